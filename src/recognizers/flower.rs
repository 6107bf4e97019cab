//! Garden: find a flower with enough seeds to plant.

use anyhow::Result;
use serde_json::json;

use super::{CustomRecognizer, Recognition, RecognizerInput, read_text};
use crate::extract::parse_seed_count;
use crate::geometry::Rect;
use crate::host::AutomationHost;

/// Seeds needed to plant one flower.
pub const SEEDS_REQUIRED: u32 = 10;

/// (seed counter, plant button) per flower, left to right.
const FLOWER_SLOTS: [(Rect, Rect); 5] = [
    (Rect::new(400, 355, 111, 32), Rect::new(440, 298, 37, 41)),
    (Rect::new(509, 355, 103, 29), Rect::new(543, 298, 29, 27)),
    (Rect::new(607, 355, 106, 27), Rect::new(642, 295, 34, 34)),
    (Rect::new(711, 355, 103, 32), Rect::new(749, 300, 29, 29)),
    (Rect::new(810, 256, 143, 140), Rect::new(844, 298, 37, 34)),
];

/// Returned when nothing is plantable. A box-less result would make the
/// host retry, so a harmless 1x1 box at the origin is reported instead.
pub const NO_TARGET_BOX: Rect = Rect::new(0, 0, 1, 1);

pub struct FindPlantableFlower;

impl CustomRecognizer for FindPlantableFlower {
    fn name(&self) -> &'static str {
        "FindPlantableFlower"
    }

    fn analyze(
        &self,
        host: &mut dyn AutomationHost,
        input: &RecognizerInput,
    ) -> Result<Option<Recognition>> {
        tracing::info!("Looking for a plantable flower ({} seeds needed)...", SEEDS_REQUIRED);

        for (slot, (seed_roi, button_roi)) in FLOWER_SLOTS.into_iter().enumerate() {
            let flower_num = slot + 1;

            let Some(text) = read_text(host, &input.screen, seed_roi)? else {
                tracing::warn!("Flower {}: seed count unreadable, skipping", flower_num);
                continue;
            };
            let seeds = match parse_seed_count(&text) {
                Ok(seeds) => seeds,
                Err(e) => {
                    tracing::warn!("Flower {}: {}", flower_num, e);
                    continue;
                }
            };

            if seeds < SEEDS_REQUIRED {
                tracing::info!(
                    "Flower {}: not enough seeds ({}/{})",
                    flower_num,
                    seeds,
                    SEEDS_REQUIRED
                );
                continue;
            }

            tracing::info!("Flower {}: enough seeds ({}/{})", flower_num, seeds, SEEDS_REQUIRED);
            return Ok(Some(Recognition::new(
                button_roi,
                json!({
                    "flower_num": flower_num,
                    "seed_count": seeds,
                    "btn_roi": button_roi.to_roi(),
                }),
            )));
        }

        Ok(Some(Recognition::new(
            NO_TARGET_BOX,
            json!({ "has_valid_target": false }),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::TextOutcome;
    use crate::host::testing::ScriptedHost;

    fn analyze(host: &mut ScriptedHost) -> Recognition {
        let input = RecognizerInput::new(host.screen.clone());
        FindPlantableFlower
            .analyze(host, &input)
            .unwrap()
            .expect("always reports a box")
    }

    fn seed_roi(slot: usize) -> [i32; 4] {
        FLOWER_SLOTS[slot].0.to_roi()
    }

    #[test]
    fn test_first_flower_with_enough_seeds() {
        let mut host = ScriptedHost::new()
            .with_text(seed_roi(0), "剩余:3/10")
            .with_text(seed_roi(1), "剩余：12/10")
            .with_text(seed_roi(2), "剩余:40/10");

        let found = analyze(&mut host);

        assert_eq!(found.rect, Rect::new(543, 298, 29, 27));
        assert_eq!(
            found.detail,
            json!({"flower_num": 2, "seed_count": 12, "btn_roi": [543, 298, 29, 27]})
        );
        assert_eq!(host.ocr_rois.len(), 2);
    }

    #[test]
    fn test_unreadable_slots_are_skipped() {
        let mut host = ScriptedHost::new()
            .with_text_outcome(seed_roi(0), TextOutcome::HitWithoutText)
            .with_text(seed_roi(1), "种子 12/10")
            .with_text(seed_roi(2), "剩余:abc/10")
            .with_text(seed_roi(4), " 剩余 : 10 / 10 ");

        let found = analyze(&mut host);

        assert_eq!(found.rect, FLOWER_SLOTS[4].1);
        assert_eq!(found.detail["flower_num"], json!(5));
        assert_eq!(found.detail["seed_count"], json!(10));
    }

    #[test]
    fn test_nothing_plantable_reports_placeholder() {
        let mut host = ScriptedHost::new()
            .with_text(seed_roi(0), "剩余:9/10")
            .with_text(seed_roi(3), "剩余:0/10");

        let found = analyze(&mut host);

        assert_eq!(found.rect, NO_TARGET_BOX);
        assert_eq!(found.detail, json!({"has_valid_target": false}));
        assert_eq!(host.ocr_rois.len(), 5);
    }
}
