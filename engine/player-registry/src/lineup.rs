//! Lineup position names and flex eligibility rules
//!
//! Positions use one vocabulary across platforms. Platform adapters translate
//! their own codes (Sleeper `BN`, `SUPER_FLEX`, `DEF`; ESPN slot ids) into
//! these names before anything reaches the ranker or the draft board.

pub const QB: &str = "QB";
pub const RB: &str = "RB";
pub const WR: &str = "WR";
pub const TE: &str = "TE";
pub const K: &str = "K";
pub const DST: &str = "D/ST";
pub const FLEX: &str = "FLEX";
pub const SUPER_FLEX: &str = "OP";
pub const RB_WR: &str = "RB/WR";
pub const WR_TE: &str = "WR/TE";
pub const BENCH: &str = "Bench";
pub const IR: &str = "IR";

/// Positions a player can hold as a default position
pub const PLAYER_POSITIONS: [&str; 6] = [QB, RB, WR, TE, K, DST];

/// Flex slots and the player positions each accepts
const FLEX_RULES: [(&str, &[&str]); 4] = [
    (FLEX, &[RB, WR, TE]),
    (SUPER_FLEX, &[QB, RB, WR, TE]),
    (RB_WR, &[RB, WR]),
    (WR_TE, &[WR, TE]),
];

/// Expand a player's natural positions into every lineup slot they can fill.
///
/// The result keeps natural positions first, then flex slots in rule order,
/// then `Bench` and `IR`, without duplicates.
pub fn eligible_lineup_positions<S: AsRef<str>>(positions: &[S]) -> Vec<String> {
    let mut eligible: Vec<String> = Vec::new();
    let mut push = |position: &str| {
        if !eligible.iter().any(|p| p == position) {
            eligible.push(position.to_string());
        }
    };

    for position in positions {
        push(position.as_ref());
    }

    for (slot, accepts) in FLEX_RULES {
        if positions.iter().any(|p| accepts.contains(&p.as_ref())) {
            push(slot);
        }
    }

    push(BENCH);
    push(IR);
    eligible
}
