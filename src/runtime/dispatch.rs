use crate::scenario::{CsvConfig, FormConfig, HandoverConfig, MailConfig, ResolvedAction};
use tracing::warn;

/// A side effect requested by a node, to be carried out by an external
/// collaborator. The core never performs the effect itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RequestHandover(HandoverConfig),
    OpenLink(String),
    RequestForm(FormConfig),
    SendMail(MailConfig),
    ExportCsv(CsvConfig),
}

/// Maps a resolved action onto the effect it requests.
///
/// Pure: no I/O happens here. An action missing its required config yields
/// `None` and the turn degrades to message-only. `Jump` and `Restart` are
/// navigation, never effects.
pub fn dispatch(action: &ResolvedAction) -> Option<Effect> {
    match action {
        ResolvedAction::Jump(_) | ResolvedAction::Restart => None,
        ResolvedAction::Handover(config) => Some(Effect::RequestHandover(config.clone())),
        ResolvedAction::Link(url) => {
            if url.is_empty() {
                warn!("link action without a target, degrading to message-only");
                return None;
            }
            Some(Effect::OpenLink(url.clone()))
        }
        ResolvedAction::Form(config) => Some(Effect::RequestForm(config.clone())),
        ResolvedAction::Mail(config) => {
            if config.to.is_empty() {
                warn!("mail action without recipients, degrading to message-only");
                return None;
            }
            Some(Effect::SendMail(config.clone()))
        }
        ResolvedAction::Csv(config) => {
            if config.file_name.as_deref().unwrap_or_default().is_empty() {
                warn!("csv action without a file name, degrading to message-only");
                return None;
            }
            Some(Effect::ExportCsv(config.clone()))
        }
    }
}
