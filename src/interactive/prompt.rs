//
//  github-rest
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Text, password, confirmation and editor prompts over `dialoguer`.
//!
//! ```no_run
//! use github_rest::interactive::prompt::{prompt_confirm, prompt_input};
//!
//! let title = prompt_input("Title").unwrap();
//! if prompt_confirm("Submit?", true).unwrap() {
//!     println!("submitting {}", title);
//! }
//! ```

use anyhow::Result;
use dialoguer::{Confirm, Editor, Input, Password};

pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

/// Masked entry, used for pasting tokens.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

pub fn prompt_confirm(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// Opens [`get_editor`] on `initial`. `None` when the editor was closed
/// without saving.
pub fn prompt_editor(initial: Option<&str>) -> Result<Option<String>> {
    let mut editor = Editor::new();
    editor.executable(get_editor());
    Ok(editor.edit(initial.unwrap_or(""))?)
}

/// `GHR_EDITOR`, then `VISUAL`, then `EDITOR`, then `nano`.
pub fn get_editor() -> String {
    editor_from(|name| std::env::var(name).ok())
}

fn editor_from<F: Fn(&str) -> Option<String>>(lookup: F) -> String {
    ["GHR_EDITOR", "VISUAL", "EDITOR"]
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| "nano".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_precedence() {
        assert_eq!(editor_from(|_| None), "nano");
        assert_eq!(
            editor_from(|name| (name == "EDITOR").then(|| "vim".to_string())),
            "vim"
        );
        assert_eq!(
            editor_from(|name| match name {
                "GHR_EDITOR" => Some("hx".to_string()),
                _ => Some("vim".to_string()),
            }),
            "hx"
        );
    }
}
