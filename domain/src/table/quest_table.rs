//! Required team size per quest (QuestTable)

use crate::core::error::GameError;

/// Number of quests in a game
pub const QUEST_COUNT: u8 = 5;

/// Team sizes for quests 1..=5 under the five-player ruleset
pub const QUEST_TEAM_SIZES: [usize; QUEST_COUNT as usize] = [2, 3, 2, 3, 3];

/// Required team size for a 1-based quest number
///
/// # Example
///
/// ```
/// use avalon_domain::table::required_team_size;
///
/// assert_eq!(required_team_size(1).unwrap(), 2);
/// assert_eq!(required_team_size(5).unwrap(), 3);
/// assert!(required_team_size(6).is_err());
/// ```
pub fn required_team_size(quest: u8) -> Result<usize, GameError> {
    if !(1..=QUEST_COUNT).contains(&quest) {
        return Err(GameError::InvalidQuestNumber(quest));
    }
    Ok(QUEST_TEAM_SIZES[(quest - 1) as usize])
}
