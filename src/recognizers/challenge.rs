//! Point race: pick the first opponent our team can beat.

use anyhow::{Context, Result};
use serde_json::json;

use super::{CustomRecognizer, Recognition, RecognizerInput, read_text};
use crate::extract::parse_power;
use crate::geometry::Rect;
use crate::host::{AutomationHost, MatchOutcome, SearchTarget, TemplateQuery};

const TEAM_POWER_ROI: Rect = Rect::new(271, 337, 178, 29);

/// Opponent power readouts, top to bottom.
const ENEMY_POWER_ROIS: [Rect; 4] = [
    Rect::new(843, 236, 100, 30),
    Rect::new(843, 352, 96, 31),
    Rect::new(843, 472, 103, 27),
    Rect::new(843, 589, 97, 29),
];

const CHALLENGE_BUTTON: &str = "point_race_get_challenge_button";

pub struct FindToChallenge;

fn read_power(
    host: &mut dyn AutomationHost,
    input: &RecognizerInput,
    roi: Rect,
) -> Result<Option<u64>> {
    let Some(text) = read_text(host, &input.screen, roi)? else {
        tracing::warn!("Could not read power at {}", roi);
        return Ok(None);
    };
    match parse_power(&text) {
        Ok(power) => {
            tracing::info!("Read power: {}", text);
            Ok(Some(power))
        }
        Err(e) => {
            tracing::warn!("{}", e);
            Ok(None)
        }
    }
}

impl CustomRecognizer for FindToChallenge {
    fn name(&self) -> &'static str {
        "FindToChallenge"
    }

    fn analyze(
        &self,
        host: &mut dyn AutomationHost,
        input: &RecognizerInput,
    ) -> Result<Option<Recognition>> {
        tracing::info!("Reading own team power...");
        let Some(team) = read_power(host, input, TEAM_POWER_ROI)? else {
            return Ok(None);
        };

        tracing::info!("Reading opponent powers...");
        for (index, roi) in ENEMY_POWER_ROIS.into_iter().enumerate() {
            let Some(enemy) = read_power(host, input, roi)? else {
                tracing::warn!("Could not read power of opponent {}", index + 1);
                return Ok(None);
            };

            if enemy > team {
                tracing::warn!("Opponent {} is too strong ({} > {})", index + 1, enemy, team);
                continue;
            }

            tracing::info!("Opponent {} can be challenged", index + 1);
            let query =
                TemplateQuery::new(SearchTarget::single(CHALLENGE_BUTTON)).with_index(index);
            let outcome = host
                .match_template(&input.screen, &query)
                .context("Challenge button lookup failed")?;
            return match outcome {
                MatchOutcome::Hit(rect) => Ok(Some(Recognition::new(rect, json!({})))),
                _ => {
                    tracing::error!("Challenge button for opponent {} not found", index + 1);
                    Ok(None)
                }
            };
        }

        tracing::info!("No opponent can be beaten, skipping");
        Ok(None)
    }
}
