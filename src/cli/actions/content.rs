use anyhow::Result;

use crate::{
    cli::{actions::user_facing, globals::GlobalArgs},
    services::{notices, subjects},
};

/// # Errors
/// Returns an error if the request fails.
pub async fn notices(globals: &GlobalArgs) -> Result<()> {
    let auth = globals.connect()?;
    auth.initialize(false).await;

    let notices = notices::list(auth.api())
        .await
        .map_err(user_facing)?
        .data
        .unwrap_or_default();

    if notices.is_empty() {
        println!("No notices");
    }
    for notice in notices {
        let date = notice.created_date.as_deref().unwrap_or("-");
        println!("[{date}] {}: {}", notice.notice_name, notice.notice_message);
    }
    Ok(())
}

/// # Errors
/// Returns an error if the request fails.
pub async fn subjects(globals: &GlobalArgs) -> Result<()> {
    let auth = globals.connect()?;
    auth.initialize(false).await;

    let subjects = subjects::list(auth.api())
        .await
        .map_err(user_facing)?
        .data
        .unwrap_or_default();

    for subject in subjects {
        println!("{}\t{}", subject.sub_id, subject.subject_name);
    }
    Ok(())
}
