use crate::changes::{self, ChangeRecord};
use crate::taxonomy::CommitType;

pub static USER_PROMPT_TEMPLATE: &str = include_str!("user_prompt.txt");

/// Render the instruction block sent to the model.
pub fn user_prompt(changes: &[ChangeRecord]) -> String {
    USER_PROMPT_TEMPLATE
        .trim_end()
        .replace("{{types}}", &CommitType::names().join(", "))
        .replace("{{changes}}", &changes::render(changes))
}
