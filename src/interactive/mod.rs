//
//  github-rest
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Terminal prompts used by `ghr` when a value is missing and `--no-prompt`
//! is not set.

pub mod prompt;
pub mod selector;

pub use prompt::*;
pub use selector::*;

/// Whether prompting is possible: a user is attached to the terminal and
/// did not pass `--no-prompt`.
pub fn can_prompt(no_prompt: bool) -> bool {
    !no_prompt && console::user_attended() && console::user_attended_stderr()
}
