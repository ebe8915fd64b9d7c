//
//  github-rest
//  interactive/selector.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! List selection prompts.

use anyhow::Result;
use dialoguer::Select;

/// Returns the index of the chosen item.
///
/// The first item is preselected.
pub fn select<T: ToString>(message: &str, items: &[T]) -> Result<usize> {
    let selection = Select::new()
        .with_prompt(message)
        .items(items)
        .default(0)
        .interact()?;
    Ok(selection)
}
