use tracing::debug;

use super::types::{TranslationOutput, TranslationRequest};
use super::{HfClient, HfError};
use crate::lang::LanguageCode;

/// English-to-target translation.
/// Implemented by `HfTranslator` for production; mock implementations used in tests.
pub trait TranslationClient {
    /// Whether a translation model exists for `target`.
    fn supports(&self, target: LanguageCode) -> bool;

    async fn translate(&self, text: &str, target: LanguageCode) -> Result<String, HfError>;
}

/// MarianMT model for each supported target. English has none.
pub fn model_for(target: LanguageCode) -> Option<&'static str> {
    match target {
        LanguageCode::Hi => Some("Helsinki-NLP/opus-mt-en-hi"),
        LanguageCode::Fr => Some("Helsinki-NLP/opus-mt-en-fr"),
        LanguageCode::De => Some("Helsinki-NLP/opus-mt-en-de"),
        LanguageCode::Es => Some("Helsinki-NLP/opus-mt-en-es"),
        LanguageCode::En => None,
    }
}

#[derive(Clone, Debug)]
pub struct HfTranslator {
    client: HfClient,
}

impl HfTranslator {
    pub fn new(client: HfClient) -> Self {
        Self { client }
    }
}

impl TranslationClient for HfTranslator {
    fn supports(&self, target: LanguageCode) -> bool {
        model_for(target).is_some()
    }

    async fn translate(&self, text: &str, target: LanguageCode) -> Result<String, HfError> {
        let model = model_for(target).ok_or(HfError::NoModel(target))?;
        let outputs: Vec<TranslationOutput> = self
            .client
            .infer(model, &TranslationRequest { inputs: text })
            .await?;

        let translated = outputs
            .into_iter()
            .next()
            .and_then(|o| o.translation_text)
            .filter(|t| !t.is_empty())
            .ok_or(HfError::MissingTranslation)?;
        debug!(%target, "translation complete");
        Ok(translated)
    }
}


#[cfg(test)]
mod http_tests {
    use super::*;
    use reqwest::Client;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn translator(server: &MockServer) -> HfTranslator {
        HfTranslator::new(HfClient::with_base_url(Client::new(), &server.uri()))
    }

    #[tokio::test]
    async fn returns_first_translation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/Helsinki-NLP/opus-mt-en-es"))
            .and(body_json(serde_json::json!({"inputs": "Click Forgot password."})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"translation_text": "Haga clic en Olvidé mi contraseña."},
                {"translation_text": "ignored"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let text = translator(&server)
            .translate("Click Forgot password.", LanguageCode::Es)
            .await
            .unwrap();
        assert_eq!(text, "Haga clic en Olvidé mi contraseña.");
    }

    #[tokio::test]
    async fn missing_translation_field_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"generated_text": "x"}])))
            .mount(&server)
            .await;

        let result = translator(&server).translate("Hello", LanguageCode::Fr).await;
        assert!(matches!(result, Err(HfError::MissingTranslation)), "got: {result:?}");
    }

    #[tokio::test]
    async fn empty_result_list_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let result = translator(&server).translate("Hello", LanguageCode::De).await;
        assert!(matches!(result, Err(HfError::MissingTranslation)));
    }

    #[tokio::test]
    async fn english_target_has_no_model() {
        let server = MockServer::start().await;
        let result = translator(&server).translate("Hello", LanguageCode::En).await;
        assert!(matches!(result, Err(HfError::NoModel(LanguageCode::En))));
    }

    #[tokio::test]
    async fn server_error_is_propagated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let result = translator(&server).translate("Hello", LanguageCode::Hi).await;
        match result {
            Err(HfError::Api { code: 500, message }) => assert!(message.contains("upstream exploded")),
            other => panic!("expected Api(500), got: {other:?}"),
        }
    }
}
