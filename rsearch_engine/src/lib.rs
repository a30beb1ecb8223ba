#![allow(clippy::new_without_default)]
#![allow(clippy::collapsible_else_if)]

pub mod types;
pub mod bitboard;
pub mod coords;
pub mod hashing;

pub mod error;
pub mod options;

pub mod evaluate;
pub mod trans_table;
pub mod killer_moves;
pub mod move_ordering;
pub mod qsearch;
pub mod alphabeta;
pub mod explore;
pub mod timer;

pub mod searchstats;
pub mod observer;

pub mod tree;

#[cfg(test)]
pub mod tests;

#[macro_export]
macro_rules! builder_field {
    ($field:ident, $field_type:ty) => {
        pub fn $field(mut self, $field: $field_type) -> Self {
            self.$field = $field;
            self
        }
    };
}
