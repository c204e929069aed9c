//! Stage resolution - pure mapping from progression to a bestiary row
//!
//! A kingdom's difficulty table is flat: four rows per chapter, one per
//! milestone ordinal (base, first investigation, second investigation,
//! quest-with-three-investigations). This encoding is a fixed contract with
//! the static content catalog and must not change independently of it.

use std::collections::HashMap;

use crate::domain::value_objects::{
    CharacterId, ChoiceStatus, DelveChoice, KnightChoice, MonsterId, StageRow,
};

/// Rows of the table that apply to one chapter
pub const STAGES_PER_CHAPTER: usize = 4;

/// The resolved difficulty row for a character's current progression.
///
/// Absent data (no bestiary, chapter out of range, index out of bounds) is
/// reported as `has_chapter == false` with an empty row, never as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestiaryStage {
    pub has_chapter: bool,
    pub stage_index: Option<usize>,
    /// Monster id to difficulty value, nulls normalized to 0
    pub row: HashMap<MonsterId, i32>,
}

impl BestiaryStage {
    /// The "no chapter data" sentinel
    pub fn absent() -> Self {
        Self {
            has_chapter: false,
            stage_index: None,
            row: HashMap::new(),
        }
    }
}

/// Which of the four chapter milestones has been reached.
///
/// Quest completion only matters at the top milestone: it upgrades three
/// finished investigations to the final row.
pub fn progress_ordinal(quest_completed: bool, investigations_done: u32) -> usize {
    if quest_completed && investigations_done >= 3 {
        3
    } else if investigations_done >= 2 {
        2
    } else if investigations_done >= 1 {
        1
    } else {
        0
    }
}

/// Resolve the active difficulty row for a chapter and milestone progress.
pub fn resolve_stage(
    stages: &[StageRow],
    chapter: u8,
    quest_completed: bool,
    investigations_done: u32,
) -> BestiaryStage {
    resolve_at_ordinal(
        stages,
        chapter,
        progress_ordinal(quest_completed, investigations_done),
    )
}

/// Resolve the row that applies mid-expedition for one character.
///
/// Investigations are counted only from that character's own recorded
/// choices; teammates' progress is never attributed across the party. A
/// free-roam choice pins the character at ordinal 0 regardless of prior
/// investigations.
pub fn resolve_expedition_stage(
    stages: &[StageRow],
    chapter: u8,
    quest_completed: bool,
    character_id: &CharacterId,
    choices: &[KnightChoice],
) -> BestiaryStage {
    let own: Vec<&KnightChoice> = choices
        .iter()
        .filter(|c| &c.character_id == character_id)
        .collect();

    if own.iter().any(|c| c.choice == DelveChoice::FreeRoam) {
        return resolve_at_ordinal(stages, chapter, 0);
    }

    let investigations_done = own
        .iter()
        .filter(|c| {
            c.choice.investigation().is_some() && c.status == ChoiceStatus::Completed
        })
        .count() as u32;

    resolve_stage(stages, chapter, quest_completed, investigations_done)
}

fn resolve_at_ordinal(stages: &[StageRow], chapter: u8, ordinal: usize) -> BestiaryStage {
    if chapter == 0 || stages.is_empty() {
        return BestiaryStage::absent();
    }

    let stage_index = (chapter as usize - 1) * STAGES_PER_CHAPTER + ordinal;
    let Some(raw) = stages.get(stage_index) else {
        return BestiaryStage::absent();
    };

    let row = raw
        .iter()
        .map(|(monster, value)| (monster.clone(), value.unwrap_or(0)))
        .collect();

    BestiaryStage {
        has_chapter: true,
        stage_index: Some(stage_index),
        row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::InvestigationId;

    fn table(rows: usize) -> Vec<StageRow> {
        (0..rows)
            .map(|i| {
                let mut row = StageRow::new();
                row.insert(MonsterId::from("wolf"), Some(i as i32));
                row.insert(MonsterId::from("wraith"), None);
                row
            })
            .collect()
    }

    #[test]
    fn ordinal_ladder_matches_milestones() {
        assert_eq!(progress_ordinal(false, 0), 0);
        assert_eq!(progress_ordinal(false, 1), 1);
        assert_eq!(progress_ordinal(false, 2), 2);
        // Three investigations without the quest stay at the second milestone
        assert_eq!(progress_ordinal(false, 3), 2);
        assert_eq!(progress_ordinal(true, 2), 2);
        assert_eq!(progress_ordinal(true, 3), 3);
        assert_eq!(progress_ordinal(true, 5), 3);
    }

    #[test]
    fn chapter_two_one_investigation_is_row_five() {
        let stages = table(8);
        let resolved = resolve_stage(&stages, 2, false, 1);
        assert!(resolved.has_chapter);
        assert_eq!(resolved.stage_index, Some(5));
        assert_eq!(resolved.row.get(&MonsterId::from("wolf")), Some(&5));
        // Deterministic across repeated calls
        assert_eq!(resolve_stage(&stages, 2, false, 1), resolved);
    }

    #[test]
    fn chapter_one_quest_and_three_investigations_is_row_three() {
        let stages = table(8);
        let resolved = resolve_stage(&stages, 1, true, 3);
        assert_eq!(resolved.stage_index, Some(3));
    }

    #[test]
    fn null_difficulty_cells_read_as_zero() {
        let stages = table(4);
        let resolved = resolve_stage(&stages, 1, false, 0);
        assert_eq!(resolved.row.get(&MonsterId::from("wraith")), Some(&0));
    }

    #[test]
    fn out_of_range_inputs_report_no_chapter() {
        let stages = table(8);
        assert!(!resolve_stage(&stages, 0, false, 0).has_chapter);
        assert!(!resolve_stage(&stages, 3, false, 0).has_chapter);
        assert!(!resolve_stage(&[], 1, false, 0).has_chapter);

        let empty = resolve_stage(&stages, 9, true, 3);
        assert_eq!(empty.stage_index, None);
        assert!(empty.row.is_empty());
    }

    #[test]
    fn expedition_stage_counts_only_own_completed_investigations() {
        let stages = table(8);
        let me = CharacterId::from("k1");
        let teammate = CharacterId::from("k2");
        let choices = vec![
            KnightChoice {
                character_id: me.clone(),
                choice: DelveChoice::Investigation(InvestigationId::new(1, 1)),
                status: ChoiceStatus::Completed,
            },
            KnightChoice {
                character_id: teammate.clone(),
                choice: DelveChoice::Investigation(InvestigationId::new(1, 2)),
                status: ChoiceStatus::Completed,
            },
        ];

        let resolved = resolve_expedition_stage(&stages, 1, false, &me, &choices);
        assert_eq!(resolved.stage_index, Some(1));

        // A failed attempt does not count
        let failed = vec![KnightChoice {
            character_id: me.clone(),
            choice: DelveChoice::Investigation(InvestigationId::new(1, 1)),
            status: ChoiceStatus::Failed,
        }];
        let resolved = resolve_expedition_stage(&stages, 1, false, &me, &failed);
        assert_eq!(resolved.stage_index, Some(0));
    }

    #[test]
    fn free_roam_pins_the_chapter_base_row() {
        let stages = table(8);
        let me = CharacterId::from("k1");
        let choices = vec![KnightChoice {
            character_id: me.clone(),
            choice: DelveChoice::FreeRoam,
            status: ChoiceStatus::InProgress,
        }];
        let resolved = resolve_expedition_stage(&stages, 2, true, &me, &choices);
        assert_eq!(resolved.stage_index, Some(4));
    }
}
