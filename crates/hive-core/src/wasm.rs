//! WebAssembly bindings for the Hive rules engine.
//!
//! This module exposes a single match to JavaScript through wasm-bindgen.
//! Structured values cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::actions::MatchAction;
use crate::game::MatchState;
use crate::hex::HexCoord;
use crate::piece::PieceType;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed match wrapper
#[wasm_bindgen]
pub struct WasmMatch {
    state: MatchState,
}

impl Default for WasmMatch {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmMatch {
    /// Start a fresh match with White to play
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmMatch {
        WasmMatch {
            state: MatchState::new(),
        }
    }

    /// Throw away the current match and start over
    #[wasm_bindgen(js_name = newMatch)]
    pub fn new_match(&mut self) {
        self.state = MatchState::new();
    }

    /// Current match snapshot as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.state.view()).unwrap_or_else(|_| "{}".to_string())
    }

    #[wasm_bindgen(js_name = placeBug)]
    pub fn place_bug(&mut self, piece_type: &str, q: i32, r: i32) -> bool {
        match piece_type.parse::<PieceType>() {
            Ok(piece_type) => self.state.place_bug(piece_type, HexCoord::new(q, r)),
            Err(_) => false,
        }
    }

    #[wasm_bindgen(js_name = moveBug)]
    pub fn move_bug(&mut self, from_q: i32, from_r: i32, to_q: i32, to_r: i32) -> bool {
        self.state
            .move_bug(HexCoord::new(from_q, from_r), HexCoord::new(to_q, to_r))
    }

    #[wasm_bindgen(js_name = forcePass)]
    pub fn force_pass(&mut self) -> bool {
        self.state.force_pass()
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: MatchAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;

        match self.state.apply_action(action) {
            Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
            Err(e) => Err(JsValue::from_str(&format!("Action failed: {}", e))),
        }
    }

    /// Placement cells as a JSON array; pass an empty string for any type
    #[wasm_bindgen(js_name = getLegalPlacements)]
    pub fn get_legal_placements(&self, piece_type: &str) -> String {
        let cells = if piece_type.is_empty() {
            self.state.legal_placements()
        } else {
            match piece_type.parse::<PieceType>() {
                Ok(piece_type) => self.state.legal_placements_for(piece_type),
                Err(_) => Vec::new(),
            }
        };
        serde_json::to_string(&cells).unwrap_or_else(|_| "[]".to_string())
    }

    /// Destinations for the piece at (q, r) as a JSON array
    #[wasm_bindgen(js_name = getLegalMoves)]
    pub fn get_legal_moves(&self, q: i32, r: i32) -> String {
        let cells = self.state.legal_moves_from(HexCoord::new(q, r));
        serde_json::to_string(&cells).unwrap_or_else(|_| "[]".to_string())
    }

    /// Valid actions for the current player as JSON array
    #[wasm_bindgen(js_name = getValidActions)]
    pub fn get_valid_actions(&self) -> String {
        serde_json::to_string(&self.state.valid_actions()).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }
}
