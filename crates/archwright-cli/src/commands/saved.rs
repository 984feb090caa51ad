//! `archwright saved` - Manage saved analyses.

use archwright_report::render_view;
use archwright_session::Session;

use crate::display;

pub async fn list(session: &Session) -> anyhow::Result<()> {
    let saved = session.saved().await?;
    if saved.is_empty() {
        println!("No saved analyses yet");
        return Ok(());
    }
    for (index, analysis) in saved.iter().enumerate() {
        println!("{}", display::saved_line(index, analysis));
    }
    Ok(())
}

pub async fn show(session: &Session, index: usize) -> anyhow::Result<()> {
    let current = session.load(index).await?;
    println!("Requirements: {}\n", current.requirements.trim());
    print!("{}", display::view(&render_view(&current)));
    Ok(())
}

pub async fn delete(session: &Session, index: usize) -> anyhow::Result<()> {
    let removed = session.delete(index).await?;
    println!("Deleted \"{}\"", removed.name);
    Ok(())
}

pub async fn clear(session: &Session, confirmed: bool) -> anyhow::Result<()> {
    if !confirmed {
        anyhow::bail!("Refusing to delete all saved analyses without --yes");
    }
    session.clear_saved().await?;
    println!("All saved analyses deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use archwright_pipeline::testing::sample_architecture;
    use archwright_session::{FileAnalysisStore, SessionSnapshot};
    use chrono::Utc;
    use std::sync::Arc;

    #[tokio::test]
    async fn clear_requires_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(Arc::new(FileAnalysisStore::new(dir.path().join("a.json"))));
        session.start(SessionSnapshot::new("blog", sample_architecture()));
        session.save(Some("blog"), Utc::now()).await.unwrap();

        assert!(clear(&session, false).await.is_err());
        assert_eq!(session.saved().await.unwrap().len(), 1);

        clear(&session, true).await.unwrap();
        assert!(session.saved().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_position_fails() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(Arc::new(FileAnalysisStore::new(dir.path().join("a.json"))));
        assert!(delete(&session, 0).await.is_err());
    }
}
