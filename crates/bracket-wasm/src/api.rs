//! WASM API for stage conversion and bracket layout.

use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

use bracket_convert::{convert_stage, StageStructure, Standings, ViewerData};
use bracket_core::{BracketKind, Edge, LayoutConfig, Match};
use bracket_layout::{compute_layout, compute_swiss_layout, detect_profile};

/// A converted stage ready to be laid out.
#[wasm_bindgen]
pub struct BracketViewer {
    data: ViewerData,
}

#[wasm_bindgen]
impl BracketViewer {
    /// Create a viewer from an external stage structure.
    ///
    /// # Example
    /// ```javascript
    /// const viewer = new BracketViewer({
    ///   stageId: "s1",
    ///   stageType: "DOUBLE_ELIMINATION",
    ///   stageItems: [...]
    /// });
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(stage_json: JsValue) -> Result<BracketViewer, JsError> {
        let stage: StageStructure = from_value(stage_json)
            .map_err(|e| JsError::new(&format!("Invalid stage structure: {}", e)))?;

        let data = convert_stage(&stage, None)
            .map_err(|e| JsError::new(&format!("Conversion failed: {}", e)))?;

        Ok(Self { data })
    }

    /// Create a viewer with a standings table supplying Swiss records,
    /// keyed by team name as `{ "Team": [wins, losses] }`.
    #[wasm_bindgen(js_name = withStandings)]
    pub fn with_standings(
        stage_json: JsValue,
        standings_json: JsValue,
    ) -> Result<BracketViewer, JsError> {
        let stage: StageStructure = from_value(stage_json)
            .map_err(|e| JsError::new(&format!("Invalid stage structure: {}", e)))?;
        let standings: Standings = from_value(standings_json)
            .map_err(|e| JsError::new(&format!("Invalid standings table: {}", e)))?;

        let data = convert_stage(&stage, Some(&standings))
            .map_err(|e| JsError::new(&format!("Conversion failed: {}", e)))?;

        Ok(Self { data })
    }

    /// Compute the layout for this stage.
    ///
    /// Swiss stages get the record-panel layout; everything else the
    /// elimination layout. `config` may be undefined to use defaults, and
    /// `use_profile` opts into size-detected double-elimination column
    /// tables.
    #[wasm_bindgen(js_name = computeLayout)]
    pub fn compute_layout(&self, config: JsValue, use_profile: bool) -> Result<JsValue, JsError> {
        let config: LayoutConfig = parse_config(config)?;
        let kind = self.kind();

        let layout = if kind == BracketKind::Swiss {
            let mut matches = self.data.matches.clone();
            compute_swiss_layout(&mut matches, &config)
        } else {
            let profile = use_profile
                .then(|| detect_profile(&self.data.matches))
                .flatten();
            compute_layout(&self.data.matches, &self.data.edges, kind, &config, profile)
        };

        layout_to_js(&layout)
    }

    /// Get the converted matches.
    #[wasm_bindgen(js_name = getMatches)]
    pub fn get_matches(&self) -> Result<JsValue, JsError> {
        to_value(&self.data.matches)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Get the flattened progression edges.
    #[wasm_bindgen(js_name = getEdges)]
    pub fn get_edges(&self) -> Result<JsValue, JsError> {
        to_value(&self.data.edges)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Get the deduplicated participants.
    #[wasm_bindgen(js_name = getParticipants)]
    pub fn get_participants(&self) -> Result<JsValue, JsError> {
        to_value(&self.data.participants)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Get the number of matches in the stage.
    #[wasm_bindgen(js_name = numMatches)]
    pub fn num_matches(&self) -> usize {
        self.data.matches.len()
    }

    fn kind(&self) -> BracketKind {
        self.data
            .stages
            .first()
            .map(|s| s.kind)
            .unwrap_or(BracketKind::SingleElimination)
    }
}

/// Lay out a raw match-and-edge graph without going through conversion.
#[wasm_bindgen(js_name = computeEliminationLayout)]
pub fn compute_elimination_layout(
    matches: JsValue,
    edges: JsValue,
    kind: JsValue,
    config: JsValue,
) -> Result<JsValue, JsError> {
    let matches: Vec<Match> =
        from_value(matches).map_err(|e| JsError::new(&format!("Invalid matches: {}", e)))?;
    let edges: Vec<Edge> =
        from_value(edges).map_err(|e| JsError::new(&format!("Invalid edges: {}", e)))?;
    let kind: BracketKind =
        from_value(kind).map_err(|e| JsError::new(&format!("Invalid bracket kind: {}", e)))?;
    let config = parse_config(config)?;

    let layout = compute_layout(&matches, &edges, kind, &config, None);
    layout_to_js(&layout)
}

/// Lay out raw Swiss matches without going through conversion.
#[wasm_bindgen(js_name = computeSwissLayout)]
pub fn compute_swiss_layout_raw(matches: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    let mut matches: Vec<Match> =
        from_value(matches).map_err(|e| JsError::new(&format!("Invalid matches: {}", e)))?;
    let config = parse_config(config)?;

    let layout = compute_swiss_layout(&mut matches, &config);
    layout_to_js(&layout)
}

fn parse_config(config: JsValue) -> Result<LayoutConfig, JsError> {
    let config: Option<LayoutConfig> = from_value(config)
        .map_err(|e| JsError::new(&format!("Invalid layout config: {}", e)))?;
    Ok(config.unwrap_or_default())
}

/// Serialize a layout through JSON so JS receives plain objects instead of
/// Map instances for the position tables.
fn layout_to_js(layout: &bracket_core::BracketLayout) -> Result<JsValue, JsError> {
    let json = serde_json::to_string(layout)
        .map_err(|e| JsError::new(&format!("JSON serialization error: {}", e)))?;
    js_sys::JSON::parse(&json).map_err(|e| JsError::new(&format!("JSON parse error: {:?}", e)))
}
