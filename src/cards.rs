use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Color {
    White,
    Red,
    Blue,
    Yellow,
    Green,
}
pub const COLORS: [Color; 5] = [
    Color::White,
    Color::Red,
    Color::Blue,
    Color::Yellow,
    Color::Green,
];

impl Color {
    pub fn full_name(self) -> &'static str {
        match self {
            Color::White => "WHITE",
            Color::Red => "RED",
            Color::Blue => "BLUE",
            Color::Yellow => "YELLOW",
            Color::Green => "GREEN",
        }
    }

    pub fn short_name(self) -> char {
        match self {
            Color::White => 'W',
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Green => 'G',
        }
    }

    // position in COLORS, used as the suit index in replays
    pub fn index(self) -> usize {
        self as usize
    }
}
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color {0:?}")]
pub struct UnknownColor(pub String);

impl FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Color, UnknownColor> {
        COLORS
            .iter()
            .copied()
            .find(|color| color.full_name() == s)
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

pub type Value = u32;
// list of values, assumed to be small to large
pub const VALUES: [Value; 5] = [1, 2, 3, 4, 5];
pub const FINAL_VALUE: Value = 5;

pub fn get_count_for_value(value: Value) -> u32 {
    match value {
        1 => 3,
        2 | 3 | 4 => 2,
        5 => 1,
        _ => 0,
    }
}

pub const TOTAL_CARDS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Card {
    pub value: Value,
    pub color: Color,
}
impl Card {
    pub fn new(color: Color, value: Value) -> Card {
        Card { color, value }
    }
}
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.color.short_name(), self.value)
    }
}

pub type Cards = Vec<Card>;

pub fn summarize(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_composition_adds_up() {
        let per_color: u32 = VALUES.iter().map(|&v| get_count_for_value(v)).sum();
        assert_eq!(per_color, 10);
        assert_eq!(per_color * COLORS.len() as u32, TOTAL_CARDS);
        assert_eq!(get_count_for_value(0), 0);
        assert_eq!(get_count_for_value(6), 0);
    }

    #[test]
    fn colors_parse_from_full_names() {
        for &color in COLORS.iter() {
            assert_eq!(color.full_name().parse::<Color>(), Ok(color));
        }
        assert_eq!(
            "red".parse::<Color>(),
            Err(UnknownColor("red".to_string()))
        );
        assert_eq!(COLORS[Color::Yellow.index()], Color::Yellow);
        assert_eq!(
            "Purple".parse::<Color>().unwrap_err().to_string(),
            "invalid color \"Purple\""
        );
    }

    #[test]
    fn cards_serialize_value_first() {
        let card = Card::new(Color::Red, 1);
        let data = serde_json::to_string(&card).unwrap();
        assert_eq!(data, r#"{"Value":1,"Color":"RED"}"#);
        assert_eq!(serde_json::from_str::<Card>(&data).unwrap(), card);
    }

    #[test]
    fn cards_display_short() {
        let cards = vec![Card::new(Color::Red, 1), Card::new(Color::Green, 5)];
        assert_eq!(summarize(&cards), "R1, G5");
    }
}
