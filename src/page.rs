//! Embedded single-page UI
//!
//! A small static shell over the JSON API; all game state lives server
//! side and every response carries the full snapshot, so the page only
//! ever swaps markup in.

pub const INDEX: &str = r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>evalboard</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 24px; background: #f7f7f2; color: #2d2d32; }
  main { display: flex; gap: 32px; flex-wrap: wrap; }
  h1 { font-size: 1.3rem; }
  #status { min-height: 1.4em; font-weight: 600; }
  #controls { margin: 12px 0; }
  #move-input { width: 10em; padding: 4px 6px; }
  button { padding: 4px 12px; margin-left: 4px; }
  #history { max-width: 420px; color: #46464b; }
  .muted { color: #9b9ba0; }
</style>
</head>
<body>
<h1>evalboard</h1>
<p id="status" class="muted">Loading&hellip;</p>
<div id="controls">
  <input id="move-input" placeholder="Your move, e.g. e4" autocomplete="off">
  <button id="submit">Submit move</button>
  <button id="undo">Undo</button>
  <button id="reset">Reset</button>
  <span id="elapsed" class="muted"></span>
</div>
<main>
  <div id="board"></div>
  <div>
    <div id="chart"><p class="muted">No completed turns yet</p></div>
    <p id="history"></p>
  </div>
</main>
<script>
const board = document.getElementById('board');
const chart = document.getElementById('chart');
const status = document.getElementById('status');
const history = document.getElementById('history');
const elapsed = document.getElementById('elapsed');
const input = document.getElementById('move-input');

function apply(snapshot) {
  board.innerHTML = snapshot.board_svg;
  chart.innerHTML = snapshot.chart_svg
    ?? '<p class="muted">No completed turns yet</p>';
  status.textContent = snapshot.status;
  elapsed.textContent = Math.floor(snapshot.elapsed_seconds) + 's elapsed';
  history.textContent = formatHistory(snapshot.history);
}

function formatHistory(moves) {
  const parts = [];
  for (let i = 0; i < moves.length; i += 2) {
    const pair = moves[i].san + (moves[i + 1] ? ' ' + moves[i + 1].san : '');
    parts.push((i / 2 + 1) + '. ' + pair);
  }
  return parts.join('  ');
}

async function command(path, body) {
  const response = await fetch(path, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: body ?? null,
  });
  apply(await response.json());
}

document.getElementById('submit').addEventListener('click', () => {
  command('/api/move', JSON.stringify({ san: input.value }));
  input.value = '';
  input.focus();
});
input.addEventListener('keydown', (event) => {
  if (event.key === 'Enter') document.getElementById('submit').click();
});
document.getElementById('undo').addEventListener('click', () => command('/api/undo'));
document.getElementById('reset').addEventListener('click', () => command('/api/reset'));

fetch('/api/state').then(r => r.json()).then(apply);
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wires_all_endpoints() {
        for endpoint in ["/api/move", "/api/undo", "/api/reset", "/api/state"] {
            assert!(INDEX.contains(endpoint), "page must call {endpoint}");
        }
    }
}
