use std::ops::{Index, IndexMut};

use crate::game::Player;

/// One `T` for every seat at the table, indexed by [`Player`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerPlayer<T>(Vec<T>);

impl<T> PerPlayer<T> {
    pub fn new<F>(num_players: u32, initialize: F) -> Self
    where
        F: FnMut(Player) -> T,
    {
        PerPlayer((0..num_players).map(initialize).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Player, &'_ T)> + '_ {
        self.0.iter().enumerate().map(|(i, t)| (i as Player, t))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Player, &'_ mut T)> + '_ {
        self.0.iter_mut().enumerate().map(|(i, t)| (i as Player, t))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for PerPlayer<T> {
    fn from(values: Vec<T>) -> Self {
        PerPlayer(values)
    }
}

impl<T> Index<Player> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        &self.0[player as usize]
    }
}

impl<T> IndexMut<Player> for PerPlayer<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        &mut self.0[player as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_by_player() {
        let mut seats = PerPlayer::new(3, |player| player * 10);
        assert_eq!(seats[2], 20);
        seats[1] += 1;
        assert_eq!(seats.iter().collect::<Vec<_>>(), vec![(0, &0), (1, &11), (2, &20)]);
    }
}
