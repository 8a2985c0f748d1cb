//! Conversion of a full 12-team, 5-round Swiss stage.

use bracket_convert::{convert_stage, StageStructure};
use bracket_core::BracketKind;
use serde_json::json;

/// 12 teams, 5 rounds of 6 matches each.
fn demo_swiss_stage() -> StageStructure {
    let rounds: Vec<serde_json::Value> = (1..=5)
        .map(|round| {
            let matches: Vec<serde_json::Value> = (1..=6)
                .map(|m| {
                    json!({
                        "matchIndex": m,
                        "status": if round < 3 { "COMPLETED" } else { "UNSCHEDULED" },
                        "slots": [
                            {"slot": 1, "teamName": format!("Team {m}")},
                            {"slot": 2, "teamName": format!("Team {}", 13 - m)}
                        ]
                    })
                })
                .collect();
            json!({
                "number": round,
                "bracketGroup": "SWISS_BRACKET",
                "date": format!("2024-03-{:02}", round),
                "bestOf": 3,
                "matches": matches
            })
        })
        .collect();

    serde_json::from_value(json!({
        "stageId": "swiss-demo",
        "stageType": "SWISS",
        "stageItems": [{"id": "sw1", "rounds": rounds}]
    }))
    .unwrap()
}

#[test]
fn demo_swiss_fixture_converts_completely() {
    let data = convert_stage(&demo_swiss_stage(), None).unwrap();

    assert_eq!(data.stages.len(), 1);
    assert_eq!(data.stages[0].kind, BracketKind::Swiss);
    assert_eq!(data.stages[0].settings.group_count, 1);
    assert_eq!(data.participants.len(), 12);
    assert_eq!(data.matches.len(), 30);

    // A round-1 match between Team 1 and Team 12 exists.
    let team_id = |name: &str| {
        data.participants
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
    };
    let t1 = team_id("Team 1").unwrap();
    let t12 = team_id("Team 12").unwrap();
    assert!(data.matches.iter().any(|m| {
        m.round_id.ends_with("round-1")
            && m.opponent1.as_ref().and_then(|o| o.participant_id) == Some(t1)
            && m.opponent2.as_ref().and_then(|o| o.participant_id) == Some(t12)
    }));

    // Every match is annotated with its round's date and best-of.
    for m in &data.matches {
        let swiss = m.swiss.as_ref().expect("swiss annotation");
        assert!(swiss.round_date.is_some());
        assert_eq!(swiss.best_of, Some(3));
    }
}

#[test]
fn converted_swiss_stage_lays_out() {
    let data = convert_stage(&demo_swiss_stage(), None).unwrap();
    let mut matches = data.matches;
    let layout =
        bracket_layout::compute_swiss_layout(&mut matches, &bracket_core::LayoutConfig::default());

    assert!(layout.connectors.is_empty());
    assert_eq!(layout.match_positions.len(), 30);
    let panels = layout.panel_positions.as_ref().unwrap();
    let total: usize = panels.iter().map(|p| p.match_count).sum();
    assert_eq!(total, 30);
}
