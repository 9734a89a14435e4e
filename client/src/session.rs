use log::{debug, error};
use shared::{valid_tag, Player, UserSettings};
use tokio::sync::mpsc;

use crate::transport::{Transport, TransportError};

/// Dismissal surface of whatever hosts the dialogs. The core awaits `hide`
/// so cleanup is acknowledged before a session is considered closed.
pub trait ModalHost {
    fn hide(&mut self) -> impl std::future::Future<Output = ()>;
}

/// Out-of-band report for best-effort writes that must not block the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    SettingsSaveFailed(String),
}

pub type NoticeSender = mpsc::UnboundedSender<Notice>;
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

pub fn notice_channel() -> (NoticeSender, NoticeReceiver) {
    mpsc::unbounded_channel()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesState {
    Editing,
    Saving,
    Saved,
    Failed,
}

/// One open notes editor. Holds the uncommitted draft; the authoritative
/// value stays on the server and is picked up by the next poll.
pub struct NotesSession {
    steam_id: u64,
    draft: String,
    state: NotesState,
}

impl NotesSession {
    /// Opens an editor seeded with the player's current notes.
    pub fn open(player: &Player) -> Self {
        Self {
            steam_id: player.steam_id,
            draft: player.notes.clone(),
            state: NotesState::Editing,
        }
    }

    pub fn state(&self) -> NotesState {
        self.state
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the draft. No validation; any text is allowed.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        if self.state == NotesState::Failed {
            self.state = NotesState::Editing;
        }
    }

    pub fn clear(&mut self) {
        self.set_draft(String::new());
    }

    /// Confirms the edit. On success the dialog is dismissed and the session
    /// ends in `Saved`; no local merge into the roster happens here. On
    /// failure the dialog stays open with the draft untouched so the user
    /// can retry or cancel.
    pub async fn save<H: ModalHost>(
        &mut self,
        transport: &Transport,
        host: &mut H,
    ) -> Result<(), TransportError> {
        self.state = NotesState::Saving;
        match transport.save_user_note(self.steam_id, &self.draft).await {
            Ok(()) => {
                debug!("Saved note for {}", self.steam_id);
                host.hide().await;
                self.state = NotesState::Saved;
                Ok(())
            }
            Err(err) => {
                error!("Error updating note: {err}");
                self.state = NotesState::Failed;
                Err(err)
            }
        }
    }

    /// Dismisses the dialog without writing; the draft dies with the session.
    pub async fn cancel<H: ModalHost>(self, host: &mut H) {
        host.hide().await;
    }
}

/// One open kick-tag editor holding the candidate tag.
#[derive(Debug, Default)]
pub struct KickTagSession {
    candidate: String,
}

impl KickTagSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    pub fn set_candidate(&mut self, tag: impl Into<String>) {
        self.candidate = tag.into();
    }

    /// Commit is only permitted for a non-empty, whitespace-free candidate.
    pub fn is_valid(&self) -> bool {
        valid_tag(&self.candidate)
    }

    /// Applies the candidate to the shared settings. Pure local mutation;
    /// the tag list travels to the server with the broader settings save.
    /// Once the mutation runs the dialog is dismissed unconditionally and
    /// the candidate resets to empty.
    ///
    /// Returns false (dialog stays open) when the candidate is invalid.
    pub async fn commit<H: ModalHost>(
        &mut self,
        settings: &mut UserSettings,
        host: &mut H,
    ) -> bool {
        if !self.is_valid() {
            return false;
        }
        settings.add_kick_tag(&self.candidate);
        self.candidate.clear();
        host.hide().await;
        true
    }
}

/// Best-effort settings persist. Failure never reopens a dialog or touches
/// the already-committed local value; it is logged and reported on the
/// notice channel instead.
pub async fn persist_settings(
    transport: &Transport,
    settings: &UserSettings,
    notices: &NoticeSender,
) {
    match transport.save_settings(settings).await {
        Ok(()) => debug!("Settings saved"),
        Err(err) => {
            error!("Error saving settings: {err}");
            let _ = notices.send(Notice::SettingsSaveFailed(err.to_string()));
        }
    }
}
