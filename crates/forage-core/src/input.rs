//! Key signal to direction mapping for the controlled agent.
//!
//! Recognized keys are `up`, `down`, `left`, and `right`, matched after
//! trimming and ignoring ASCII case. Anything else, including an empty
//! signal, stops the controlled agent.

use forage_types::Direction;

/// Map a raw key signal to a movement direction.
pub fn direction_for_key(key: &str) -> Direction {
    let key = key.trim();
    if key.eq_ignore_ascii_case("up") {
        Direction::UP
    } else if key.eq_ignore_ascii_case("down") {
        Direction::DOWN
    } else if key.eq_ignore_ascii_case("left") {
        Direction::LEFT
    } else if key.eq_ignore_ascii_case("right") {
        Direction::RIGHT
    } else {
        Direction::NEUTRAL
    }
}
