//! UCI wire protocol, engine-to-GUI direction
//!
//! Engines talk in whitespace-separated keyword lines. Only the lines
//! the adapter acts on get their own variants; everything else is
//! passed through as `Other` so callers can log it and move on.

use evalboard_session::Evaluation;

/// One parsed line of engine output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineMessage {
    /// `uciok`, end of the identification phase
    UciOk,
    /// `readyok`, engine drained its command queue
    ReadyOk,
    /// `info ...` search progress; only depth and score are retained
    Info {
        depth: Option<u32>,
        score: Option<Evaluation>,
    },
    /// `bestmove <uci> [ponder <uci>]`, end of a search
    BestMove {
        uci: String,
        ponder: Option<String>,
    },
    /// Anything the adapter has no use for (id, option, banners)
    Other(String),
}

/// Parse a single line of engine output
///
/// Never fails: UCI obliges GUIs to ignore unknown tokens, so malformed
/// input degrades to `Other` rather than erroring.
pub fn parse_line(line: &str) -> EngineMessage {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("uciok") => EngineMessage::UciOk,
        Some("readyok") => EngineMessage::ReadyOk,
        Some("info") => parse_info(tokens),
        Some("bestmove") => match tokens.next() {
            Some(uci) => {
                let ponder = match (tokens.next(), tokens.next()) {
                    (Some("ponder"), Some(p)) => Some(p.to_string()),
                    _ => None,
                };
                EngineMessage::BestMove {
                    uci: uci.to_string(),
                    ponder,
                }
            }
            None => EngineMessage::Other(line.to_string()),
        },
        _ => EngineMessage::Other(line.to_string()),
    }
}

fn parse_info<'a>(mut tokens: impl Iterator<Item = &'a str>) -> EngineMessage {
    let mut depth = None;
    let mut score = None;

    while let Some(token) = tokens.next() {
        match token {
            "depth" => {
                depth = tokens.next().and_then(|t| t.parse().ok());
            }
            "score" => match tokens.next() {
                Some("cp") => {
                    score = tokens
                        .next()
                        .and_then(|t| t.parse().ok())
                        .map(Evaluation::Centipawns);
                }
                Some("mate") => {
                    score = tokens
                        .next()
                        .and_then(|t| t.parse().ok())
                        .map(Evaluation::Mate);
                }
                _ => {}
            },
            // `pv` runs to the end of the line and would swallow
            // nothing useful; stop scanning.
            "pv" => break,
            _ => {}
        }
    }

    EngineMessage::Info { depth, score }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uciok_and_readyok() {
        assert_eq!(parse_line("uciok"), EngineMessage::UciOk);
        assert_eq!(parse_line("readyok"), EngineMessage::ReadyOk);
    }

    #[test]
    fn test_parse_bestmove() {
        assert_eq!(
            parse_line("bestmove e2e4"),
            EngineMessage::BestMove {
                uci: "e2e4".to_string(),
                ponder: None,
            }
        );
    }

    #[test]
    fn test_parse_bestmove_with_ponder() {
        assert_eq!(
            parse_line("bestmove g1f3 ponder g8f6"),
            EngineMessage::BestMove {
                uci: "g1f3".to_string(),
                ponder: Some("g8f6".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_info_with_cp_score() {
        let msg = parse_line(
            "info depth 18 seldepth 24 multipv 1 score cp 31 nodes 123456 nps 1000000 pv e2e4 e7e5",
        );
        assert_eq!(
            msg,
            EngineMessage::Info {
                depth: Some(18),
                score: Some(Evaluation::Centipawns(31)),
            }
        );
    }

    #[test]
    fn test_parse_info_with_negative_mate() {
        let msg = parse_line("info depth 12 score mate -3 nodes 999");
        assert_eq!(
            msg,
            EngineMessage::Info {
                depth: Some(12),
                score: Some(Evaluation::Mate(-3)),
            }
        );
    }

    #[test]
    fn test_parse_info_without_score() {
        let msg = parse_line("info depth 5 currmove e2e4 currmovenumber 1");
        assert_eq!(
            msg,
            EngineMessage::Info {
                depth: Some(5),
                score: None,
            }
        );
    }

    #[test]
    fn test_score_tokens_inside_pv_are_ignored() {
        // Nothing after `pv` may be reinterpreted as keywords.
        let msg = parse_line("info depth 9 score cp -44 pv d7d5 score cp 9999");
        assert_eq!(
            msg,
            EngineMessage::Info {
                depth: Some(9),
                score: Some(Evaluation::Centipawns(-44)),
            }
        );
    }

    #[test]
    fn test_unknown_lines_pass_through() {
        let msg = parse_line("id name Stockfish 16");
        assert_eq!(msg, EngineMessage::Other("id name Stockfish 16".to_string()));

        let msg = parse_line("");
        assert!(matches!(msg, EngineMessage::Other(_)));
    }
}
