
use crate::types::*;
use crate::evaluate::*;
use crate::error::{ConfigError,ConfigResult};
use crate::trans_table::MAX_TT_SIZE_LOG2;
use crate::observer::ObserverKind;
use crate::builder_field;

use std::path::Path;

use serde::{Serialize,Deserialize};

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Position cache holds 2^tt_size_log2 entries
    pub tt_size_log2:             u8,
    /// Iterative deepening ceiling
    pub max_depth:                Depth,
    /// Added to the ceiling when the root is already an endgame
    pub endgame_extra_depth:      Depth,
    /// Extra plies for the first ordered move at each node, one less for
    /// each following move
    pub primary_move_extension:   Depth,
    pub max_qsearch_ply:          Depth,
    /// Total pieces, kings included, at or below which the endgame king table is used
    pub endgame_pieces:           u32,
    /// Total pieces at or below which the stronger king is pulled toward the weaker one
    pub king_hunt_pieces:         u32,
    pub endgame_pawn_push_bonus:  Score,
    pub draw_value:               Score,
    /// Another iteration needs remaining time > factor * last iteration time
    pub time_growth_factor:       u32,
    pub instant_single_reply:     bool,
    pub quiescence:               bool,
    pub tt_in_qsearch:            bool,
    pub observer:                 ObserverKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tt_size_log2:             20,
            max_depth:                6,
            endgame_extra_depth:      3,
            primary_move_extension:   0,
            max_qsearch_ply:          8,
            endgame_pieces:           6,
            king_hunt_pieces:         4,
            endgame_pawn_push_bonus:  30,
            draw_value:               DRAW_VALUE,
            time_growth_factor:       3,
            instant_single_reply:     true,
            quiescence:               true,
            tt_in_qsearch:            true,
            observer:                 ObserverKind::Log,
        }
    }
}

/// Builder
impl EngineConfig {
    builder_field!(tt_size_log2, u8);
    builder_field!(max_depth, Depth);
    builder_field!(endgame_extra_depth, Depth);
    builder_field!(primary_move_extension, Depth);
    builder_field!(max_qsearch_ply, Depth);
    builder_field!(endgame_pieces, u32);
    builder_field!(king_hunt_pieces, u32);
    builder_field!(endgame_pawn_push_bonus, Score);
    builder_field!(draw_value, Score);
    builder_field!(time_growth_factor, u32);
    builder_field!(instant_single_reply, bool);
    builder_field!(quiescence, bool);
    builder_field!(tt_in_qsearch, bool);
    builder_field!(observer, ObserverKind);
}

/// read, validate
impl EngineConfig {

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let b = std::fs::read_to_string(path)
            .map_err(|error| ConfigError::Read { error })?;
        Self::from_json(&b)
    }

    pub fn from_json(s: &str) -> ConfigResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|error| ConfigError::Parse { error })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|e| format!("{{ \"error\": \"{}\" }}", e))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.tt_size_log2 == 0 || self.tt_size_log2 > MAX_TT_SIZE_LOG2 {
            return Err(ConfigError::invalid("tt_size_log2",
                format!("must be in 1..={}", MAX_TT_SIZE_LOG2)));
        }
        if self.max_depth < 1 {
            return Err(ConfigError::invalid("max_depth", "must be at least 1"));
        }
        if self.endgame_extra_depth < 0 {
            return Err(ConfigError::invalid("endgame_extra_depth", "must not be negative"));
        }
        if self.primary_move_extension < 0 {
            return Err(ConfigError::invalid("primary_move_extension", "must not be negative"));
        }
        if self.max_qsearch_ply < 0 {
            return Err(ConfigError::invalid("max_qsearch_ply", "must not be negative"));
        }
        let max_ply = self.max_depth
            + self.endgame_extra_depth
            + self.primary_move_extension
            + self.max_qsearch_ply;
        if max_ply >= MAX_SEARCH_PLY {
            return Err(ConfigError::invalid("max_depth",
                format!("max_depth + endgame_extra_depth + primary_move_extension + max_qsearch_ply must stay below {}",
                        MAX_SEARCH_PLY)));
        }
        if is_mate_score(self.draw_value) {
            return Err(ConfigError::invalid("draw_value", "inside the mate score band"));
        }
        if self.time_growth_factor < 1 {
            return Err(ConfigError::invalid("time_growth_factor", "must be at least 1"));
        }
        Ok(())
    }

}
