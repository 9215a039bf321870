use tracing::warn;

use crate::hf::translation::TranslationClient;
use crate::lang::LanguageCode;

/// Best-effort translation. Always returns a string: English, unsupported targets,
/// and any remote failure all yield the input text unchanged.
#[derive(Debug, Clone)]
pub struct TranslationGateway<T> {
    client: T,
}

impl<T: TranslationClient> TranslationGateway<T> {
    pub fn new(client: T) -> Self {
        Self { client }
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &T {
        &self.client
    }

    pub async fn translate(&self, text: &str, target: LanguageCode) -> String {
        if target == LanguageCode::En || !self.client.supports(target) {
            return text.to_string();
        }

        match self.client.translate(text, target).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!(error = %e, language = %target, "translation failed, returning untranslated text");
                text.to_string()
            }
        }
    }
}
