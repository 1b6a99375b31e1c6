// messaging-api-client/src/messenger.rs
use crate::config::MessengerConfig;
use crate::types::messenger::{
    Attachment, BatchItem, BatchResponse, GetStarted, Greeting, IceBreaker, IdResponse,
    ImageAspectRatio, Insight, InsightMetric, InsightOptions, MediaElement, MediaSource, MediaType,
    Message, MessageTag, MessageTagInfo, MessagingFeatureReview, MessagingType, MessengerProfile,
    MessengerProfileField, MessengerSubscription, MutationSuccessResponse, NlpConfig, Page,
    PageInfo, PersistentMenuItem, Persona, ReceiptAttributes, Recipient, SendMessageResponse,
    SendOptions, SendSenderActionResponse, SenderAction, SenderActionOptions, SubscriptionOptions, SuccessResponse,
    TemplateButton, TemplateElement, TemplatePayload, TokenInfo, UploadAttachmentResponse,
    UploadSource, User, UserPersistentMenu, UserProfileField,
};
use crate::{path_segment, with_json};
use hmac::{Hmac, Mac};
use messaging_api_common::{
    code_to_string, BackendFailure, Convention, HttpClient, HttpRequest, MultipartForm,
    OperationError, OperationResult, PayloadLocation, ReqwestClient,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use sha2::Sha256;
use tracing::{debug, instrument, warn};

type HmacSha256 = Hmac<Sha256>;

/// Graph API limit on requests per batch
pub const MAX_BATCH_SIZE: usize = 50;

fn is_success(body: &Value) -> bool {
    body.get("error").is_none()
}

fn describe_failure(body: &Value) -> Option<BackendFailure> {
    let error = body.get("error")?;
    let code = error
        .get("code")
        .and_then(code_to_string)
        .unwrap_or_else(|| "unknown".to_string());
    let kind = error.get("type").and_then(Value::as_str).unwrap_or_default();
    let message = error.get("message").and_then(Value::as_str).unwrap_or_default();
    Some(BackendFailure::new(code, format!("{} {}", kind, message)))
}

/// Graph API envelope: failures carry an `error` object, success is the body
pub const GRAPH_API: Convention = Convention {
    namespace: "Messenger API",
    is_success,
    describe_failure,
    payload: PayloadLocation::Body,
};

/// `appsecret_proof` for a token: hex HMAC-SHA256 of the token keyed by the
/// app secret
pub fn appsecret_proof(access_token: &str, app_secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(app_secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(access_token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// `{"data": ...}` wrapper used by list and lookup endpoints
#[derive(Deserialize)]
struct Data<T> {
    data: T,
}

#[derive(Serialize)]
struct SendBody<'a> {
    messaging_type: MessagingType,
    recipient: &'a Recipient,
    message: &'a Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<MessageTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    persona_id: Option<&'a str>,
}

#[derive(Serialize)]
struct SenderActionBody<'a> {
    recipient: &'a Recipient,
    sender_action: SenderAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    persona_id: Option<&'a str>,
}

/// Messenger Platform client over the Graph API
pub struct Messenger<C: HttpClient = ReqwestClient> {
    http: C,
    access_token: String,
    app_id: Option<String>,
    app_secret: Option<String>,
    appsecret_proof: Option<String>,
}

impl Messenger<ReqwestClient> {
    pub fn new(config: &MessengerConfig) -> Self {
        let mut http = ReqwestClient::new(config.base_url());
        if let Some(timeout) = config.timeout() {
            http = http.with_timeout(timeout);
        }
        Self::with_client(http, config)
    }
}

impl<C: HttpClient> Messenger<C> {
    /// Use a custom transport, already bound to the Graph API base URL
    pub fn with_client(http: C, config: &MessengerConfig) -> Self {
        let appsecret_proof = match &config.app_secret {
            Some(secret) if !config.skip_app_secret_proof => {
                Some(appsecret_proof(&config.access_token, secret))
            }
            _ => None,
        };
        Self {
            http,
            access_token: config.access_token.clone(),
            app_id: config.app_id.clone(),
            app_secret: config.app_secret.clone(),
            appsecret_proof,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Page token credentials on every page-level call
    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        let request = request.query("access_token", &self.access_token);
        match &self.appsecret_proof {
            Some(proof) => request.query("appsecret_proof", proof),
            None => request,
        }
    }

    /// `app_id|app_secret` token for app-level endpoints
    fn app_access_token(&self, operation: &str) -> OperationResult<(&str, String)> {
        match (&self.app_id, &self.app_secret) {
            (Some(app_id), Some(app_secret)) => {
                Ok((app_id.as_str(), format!("{}|{}", app_id, app_secret)))
            }
            _ => Err(OperationError::invalid_argument(format!(
                "{}: `app_id` and `app_secret` are required",
                operation
            ))),
        }
    }

    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send<T: DeserializeOwned>(&self, request: HttpRequest) -> OperationResult<T> {
        let exchange = self.http.send(request).await;
        let result = GRAPH_API.extract_required(&exchange);
        if let Err(err) = &result {
            warn!(error = %err, "Messenger request failed");
        }
        result
    }

    async fn call<T: DeserializeOwned>(&self, request: HttpRequest) -> OperationResult<T> {
        self.send(self.authorize(request)).await
    }

    // Send API

    /// Post an already-built body to the Send API
    pub async fn send_raw_body(&self, body: &Value) -> OperationResult<SendMessageResponse> {
        self.call(with_json(HttpRequest::post("me/messages"), body)?)
            .await
    }

    pub async fn send_message(
        &self,
        recipient: impl Into<Recipient>,
        mut message: Message,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        let recipient = recipient.into();
        let messaging_type = options.messaging_type.unwrap_or(if options.tag.is_some() {
            MessagingType::MessageTag
        } else {
            MessagingType::Response
        });
        if !options.quick_replies.is_empty() {
            message.quick_replies = options.quick_replies;
        }
        let body = SendBody {
            messaging_type,
            recipient: &recipient,
            message: &message,
            tag: options.tag,
            persona_id: options.persona_id.as_deref(),
        };
        self.call(with_json(HttpRequest::post("me/messages"), &body)?)
            .await
    }

    pub async fn send_text(
        &self,
        recipient: impl Into<Recipient>,
        text: impl Into<String>,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        self.send_message(recipient, Message::text(text), options)
            .await
    }

    pub async fn send_attachment(
        &self,
        recipient: impl Into<Recipient>,
        attachment: Attachment,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        self.send_message(recipient, Message::attachment(attachment), options)
            .await
    }

    async fn send_media(
        &self,
        recipient: impl Into<Recipient>,
        media_type: MediaType,
        source: MediaSource,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        self.send_attachment(recipient, Attachment::media(media_type, source), options)
            .await
    }

    pub async fn send_image(
        &self,
        recipient: impl Into<Recipient>,
        source: MediaSource,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        self.send_media(recipient, MediaType::Image, source, options)
            .await
    }

    pub async fn send_audio(
        &self,
        recipient: impl Into<Recipient>,
        source: MediaSource,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        self.send_media(recipient, MediaType::Audio, source, options)
            .await
    }

    pub async fn send_video(
        &self,
        recipient: impl Into<Recipient>,
        source: MediaSource,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        self.send_media(recipient, MediaType::Video, source, options)
            .await
    }

    pub async fn send_file(
        &self,
        recipient: impl Into<Recipient>,
        source: MediaSource,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        self.send_media(recipient, MediaType::File, source, options)
            .await
    }

    pub async fn send_template(
        &self,
        recipient: impl Into<Recipient>,
        payload: TemplatePayload,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        self.send_attachment(recipient, Attachment::Template(payload), options)
            .await
    }

    pub async fn send_button_template(
        &self,
        recipient: impl Into<Recipient>,
        text: impl Into<String>,
        buttons: Vec<TemplateButton>,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        let payload = TemplatePayload::Button {
            text: text.into(),
            buttons,
        };
        self.send_template(recipient, payload, options).await
    }

    pub async fn send_generic_template(
        &self,
        recipient: impl Into<Recipient>,
        elements: Vec<TemplateElement>,
        image_aspect_ratio: Option<ImageAspectRatio>,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        let payload = TemplatePayload::Generic {
            elements,
            image_aspect_ratio,
        };
        self.send_template(recipient, payload, options).await
    }

    pub async fn send_media_template(
        &self,
        recipient: impl Into<Recipient>,
        elements: Vec<MediaElement>,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        self.send_template(recipient, TemplatePayload::Media { elements }, options)
            .await
    }

    pub async fn send_receipt_template(
        &self,
        recipient: impl Into<Recipient>,
        receipt: ReceiptAttributes,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        self.send_template(recipient, TemplatePayload::Receipt(receipt), options)
            .await
    }

    /// Ask the user for permission to send one follow-up message
    pub async fn send_one_time_notif_req_template(
        &self,
        recipient: impl Into<Recipient>,
        title: impl Into<String>,
        payload: impl Into<String>,
        options: SendOptions,
    ) -> OperationResult<SendMessageResponse> {
        let payload = TemplatePayload::OneTimeNotifReq {
            title: title.into(),
            payload: payload.into(),
        };
        self.send_template(recipient, payload, options).await
    }

    // Sender actions

    pub async fn send_sender_action(
        &self,
        recipient: impl Into<Recipient>,
        sender_action: SenderAction,
        options: SenderActionOptions,
    ) -> OperationResult<SendSenderActionResponse> {
        let recipient = recipient.into();
        let body = SenderActionBody {
            recipient: &recipient,
            sender_action,
            persona_id: options.persona_id.as_deref(),
        };
        self.call(with_json(HttpRequest::post("me/messages"), &body)?)
            .await
    }

    pub async fn mark_seen(
        &self,
        recipient: impl Into<Recipient>,
        options: SenderActionOptions,
    ) -> OperationResult<SendSenderActionResponse> {
        self.send_sender_action(recipient, SenderAction::MarkSeen, options)
            .await
    }

    pub async fn typing_on(
        &self,
        recipient: impl Into<Recipient>,
        options: SenderActionOptions,
    ) -> OperationResult<SendSenderActionResponse> {
        self.send_sender_action(recipient, SenderAction::TypingOn, options)
            .await
    }

    pub async fn typing_off(
        &self,
        recipient: impl Into<Recipient>,
        options: SenderActionOptions,
    ) -> OperationResult<SendSenderActionResponse> {
        self.send_sender_action(recipient, SenderAction::TypingOff, options)
            .await
    }

    // Attachment upload

    /// Upload media for reuse in later sends.
    ///
    /// File bytes go out as a multipart body with a `message` JSON field and a
    /// `filedata` part.
    pub async fn upload_attachment(
        &self,
        media_type: MediaType,
        source: UploadSource,
    ) -> OperationResult<UploadAttachmentResponse> {
        let request = HttpRequest::post("me/message_attachments");
        let request = match source {
            UploadSource::Url { url, is_reusable } => {
                let body = json!({
                    "message": {
                        "attachment": {
                            "type": media_type,
                            "payload": {"url": url, "is_reusable": is_reusable}
                        }
                    }
                });
                with_json(request, &body)?
            }
            UploadSource::File { data, is_reusable } => {
                let message = json!({
                    "attachment": {
                        "type": media_type,
                        "payload": {"is_reusable": is_reusable}
                    }
                });
                debug!(bytes = data.len(), "Uploading attachment file");
                let form = MultipartForm::new()
                    .text("message", message.to_string())
                    .file("filedata", data);
                request.multipart(form)
            }
        };
        self.call(request).await
    }

    // User profile

    /// Fetch profile fields of a user; an empty `fields` asks for the defaults
    pub async fn get_user_profile(
        &self,
        user_id: &str,
        fields: &[UserProfileField],
    ) -> OperationResult<User> {
        let user_id = path_segment("get_user_profile", user_id)?;
        let fields: &[UserProfileField] = if fields.is_empty() {
            &UserProfileField::DEFAULT
        } else {
            fields
        };
        let fields = fields
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(",");
        self.call(HttpRequest::get(user_id).query("fields", fields))
            .await
    }

    // Messenger profile

    pub async fn get_messenger_profile(
        &self,
        fields: &[MessengerProfileField],
    ) -> OperationResult<Option<MessengerProfile>> {
        if fields.is_empty() {
            return Err(OperationError::invalid_argument(
                "get_messenger_profile: At least one field must be requested",
            ));
        }
        let fields = fields
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let page: Page<MessengerProfile> = self
            .call(HttpRequest::get("me/messenger_profile").query("fields", fields))
            .await?;
        Ok(page.data.into_iter().next())
    }

    pub async fn set_messenger_profile(
        &self,
        profile: &MessengerProfile,
    ) -> OperationResult<MutationSuccessResponse> {
        self.call(with_json(HttpRequest::post("me/messenger_profile"), profile)?)
            .await
    }

    pub async fn delete_messenger_profile(
        &self,
        fields: &[MessengerProfileField],
    ) -> OperationResult<MutationSuccessResponse> {
        let body = json!({ "fields": fields });
        self.call(with_json(HttpRequest::delete("me/messenger_profile"), &body)?)
            .await
    }

    async fn get_profile_field(
        &self,
        field: MessengerProfileField,
    ) -> OperationResult<MessengerProfile> {
        Ok(self
            .get_messenger_profile(&[field])
            .await?
            .unwrap_or_default())
    }

    pub async fn get_persistent_menu(&self) -> OperationResult<Option<Vec<PersistentMenuItem>>> {
        Ok(self
            .get_profile_field(MessengerProfileField::PersistentMenu)
            .await?
            .persistent_menu)
    }

    pub async fn set_persistent_menu(
        &self,
        menu: Vec<PersistentMenuItem>,
    ) -> OperationResult<MutationSuccessResponse> {
        self.set_messenger_profile(&MessengerProfile {
            persistent_menu: Some(menu),
            ..Default::default()
        })
        .await
    }

    pub async fn delete_persistent_menu(&self) -> OperationResult<MutationSuccessResponse> {
        self.delete_messenger_profile(&[MessengerProfileField::PersistentMenu])
            .await
    }

    pub async fn get_get_started(&self) -> OperationResult<Option<GetStarted>> {
        Ok(self
            .get_profile_field(MessengerProfileField::GetStarted)
            .await?
            .get_started)
    }

    pub async fn set_get_started(
        &self,
        payload: impl Into<String>,
    ) -> OperationResult<MutationSuccessResponse> {
        self.set_messenger_profile(&MessengerProfile {
            get_started: Some(GetStarted {
                payload: payload.into(),
            }),
            ..Default::default()
        })
        .await
    }

    pub async fn delete_get_started(&self) -> OperationResult<MutationSuccessResponse> {
        self.delete_messenger_profile(&[MessengerProfileField::GetStarted])
            .await
    }

    pub async fn get_greeting(&self) -> OperationResult<Option<Vec<Greeting>>> {
        Ok(self
            .get_profile_field(MessengerProfileField::Greeting)
            .await?
            .greeting)
    }

    pub async fn set_greeting(
        &self,
        greeting: Vec<Greeting>,
    ) -> OperationResult<MutationSuccessResponse> {
        self.set_messenger_profile(&MessengerProfile {
            greeting: Some(greeting),
            ..Default::default()
        })
        .await
    }

    pub async fn delete_greeting(&self) -> OperationResult<MutationSuccessResponse> {
        self.delete_messenger_profile(&[MessengerProfileField::Greeting])
            .await
    }

    pub async fn get_ice_breakers(&self) -> OperationResult<Option<Vec<IceBreaker>>> {
        Ok(self
            .get_profile_field(MessengerProfileField::IceBreakers)
            .await?
            .ice_breakers)
    }

    pub async fn set_ice_breakers(
        &self,
        ice_breakers: Vec<IceBreaker>,
    ) -> OperationResult<MutationSuccessResponse> {
        self.set_messenger_profile(&MessengerProfile {
            ice_breakers: Some(ice_breakers),
            ..Default::default()
        })
        .await
    }

    pub async fn delete_ice_breakers(&self) -> OperationResult<MutationSuccessResponse> {
        self.delete_messenger_profile(&[MessengerProfileField::IceBreakers])
            .await
    }

    pub async fn get_whitelisted_domains(&self) -> OperationResult<Option<Vec<String>>> {
        Ok(self
            .get_profile_field(MessengerProfileField::WhitelistedDomains)
            .await?
            .whitelisted_domains)
    }

    pub async fn set_whitelisted_domains(
        &self,
        domains: Vec<String>,
    ) -> OperationResult<MutationSuccessResponse> {
        self.set_messenger_profile(&MessengerProfile {
            whitelisted_domains: Some(domains),
            ..Default::default()
        })
        .await
    }

    pub async fn delete_whitelisted_domains(&self) -> OperationResult<MutationSuccessResponse> {
        self.delete_messenger_profile(&[MessengerProfileField::WhitelistedDomains])
            .await
    }

    // User-level persistent menu

    pub async fn get_user_persistent_menu(
        &self,
        user_id: &str,
    ) -> OperationResult<Option<UserPersistentMenu>> {
        let page: Page<UserPersistentMenu> = self
            .call(HttpRequest::get("me/custom_user_settings").query("psid", user_id))
            .await?;
        Ok(page.data.into_iter().next())
    }

    pub async fn set_user_persistent_menu(
        &self,
        user_id: &str,
        menu: Vec<PersistentMenuItem>,
    ) -> OperationResult<MutationSuccessResponse> {
        let body = json!({ "psid": user_id, "persistent_menu": menu });
        self.call(with_json(HttpRequest::post("me/custom_user_settings"), &body)?)
            .await
    }

    pub async fn delete_user_persistent_menu(
        &self,
        user_id: &str,
    ) -> OperationResult<MutationSuccessResponse> {
        let request = HttpRequest::delete("me/custom_user_settings")
            .query("psid", user_id)
            .query("params", r#"["persistent_menu"]"#);
        self.call(request).await
    }

    // Personas

    pub async fn create_persona(&self, persona: &Persona) -> OperationResult<IdResponse> {
        self.call(with_json(HttpRequest::post("me/personas"), persona)?)
            .await
    }

    pub async fn get_persona(&self, persona_id: &str) -> OperationResult<Persona> {
        let persona_id = path_segment("get_persona", persona_id)?;
        self.call(HttpRequest::get(persona_id)).await
    }

    /// One page of personas; pass the previous page's cursor to continue
    pub async fn get_personas(&self, after: Option<&str>) -> OperationResult<Page<Persona>> {
        let mut request = HttpRequest::get("me/personas");
        if let Some(cursor) = after {
            request = request.query("after", cursor);
        }
        self.call(request).await
    }

    pub async fn delete_persona(&self, persona_id: &str) -> OperationResult<SuccessResponse> {
        let persona_id = path_segment("delete_persona", persona_id)?;
        self.call(HttpRequest::delete(persona_id)).await
    }

    // Page and app

    pub async fn get_page_info(&self) -> OperationResult<PageInfo> {
        self.call(HttpRequest::get("me")).await
    }

    /// Inspect the page access token; needs app credentials
    pub async fn debug_token(&self) -> OperationResult<TokenInfo> {
        let (_, app_token) = self.app_access_token("debug_token")?;
        let request = HttpRequest::get("debug_token")
            .query("input_token", &self.access_token)
            .query("access_token", app_token);
        let data: Data<TokenInfo> = self.send(request).await?;
        Ok(data.data)
    }

    pub async fn get_message_tags(&self) -> OperationResult<Vec<MessageTagInfo>> {
        let data: Data<Vec<MessageTagInfo>> = self.call(HttpRequest::get("page_message_tags")).await?;
        Ok(data.data)
    }

    pub async fn get_messaging_feature_review(
        &self,
    ) -> OperationResult<Vec<MessagingFeatureReview>> {
        let data: Data<Vec<MessagingFeatureReview>> = self
            .call(HttpRequest::get("me/messaging_feature_review"))
            .await?;
        Ok(data.data)
    }

    /// Subscribe the app's webhook; needs app credentials
    pub async fn create_subscription(
        &self,
        options: &SubscriptionOptions,
    ) -> OperationResult<SuccessResponse> {
        let (app_id, app_token) = self.app_access_token("create_subscription")?;
        let app_id = path_segment("create_subscription", app_id)?;
        let mut body = Map::new();
        body.insert("object".into(), options.object.clone().into());
        body.insert("callback_url".into(), options.callback_url.clone().into());
        body.insert("fields".into(), options.fields.join(",").into());
        body.insert("verify_token".into(), options.verify_token.clone().into());
        if let Some(include_values) = options.include_values {
            body.insert("include_values".into(), include_values.into());
        }
        let request = HttpRequest::post(format!("{}/subscriptions", app_id))
            .query("access_token", app_token);
        self.send(with_json(request, &body)?).await
    }

    /// Webhook subscriptions of the app; needs app credentials
    pub async fn get_subscriptions(&self) -> OperationResult<Vec<MessengerSubscription>> {
        let (app_id, app_token) = self.app_access_token("get_subscriptions")?;
        let app_id = path_segment("get_subscriptions", app_id)?;
        let request = HttpRequest::get(format!("{}/subscriptions", app_id))
            .query("access_token", app_token);
        let data: Data<Vec<MessengerSubscription>> = self.send(request).await?;
        Ok(data.data)
    }

    /// Configure built-in NLP for the page
    pub async fn set_nlp_configs(&self, config: &NlpConfig) -> OperationResult<SuccessResponse> {
        self.call(with_json(HttpRequest::post("me/nlp_configs"), config)?)
            .await
    }

    // Insights

    pub async fn get_insights(
        &self,
        metrics: &[InsightMetric],
        options: InsightOptions,
    ) -> OperationResult<Vec<Insight>> {
        if metrics.is_empty() {
            return Err(OperationError::invalid_argument(
                "get_insights: At least one metric must be requested",
            ));
        }
        let metric = metrics
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let mut request = HttpRequest::get("me/insights").query("metric", metric);
        if let Some(since) = options.since {
            request = request.query("since", since.timestamp().to_string());
        }
        if let Some(until) = options.until {
            request = request.query("until", until.timestamp().to_string());
        }
        let data: Data<Vec<Insight>> = self.call(request).await?;
        Ok(data.data)
    }

    // Batch

    /// Send up to [`MAX_BATCH_SIZE`] calls in one request.
    ///
    /// Results come back in item order; an item the API omitted (for example
    /// with `omit_response_on_success`) is `None`.
    pub async fn send_batch(
        &self,
        items: &[BatchItem],
    ) -> OperationResult<Vec<Option<BatchResponse>>> {
        if items.len() > MAX_BATCH_SIZE {
            return Err(OperationError::invalid_argument(format!(
                "send_batch: A batch cannot contain more than {} requests, got {}",
                MAX_BATCH_SIZE,
                items.len()
            )));
        }
        let batch = items.iter().map(batch_item_json).collect::<Vec<_>>();
        let body = json!({ "batch": batch });
        self.call(with_json(HttpRequest::post(""), &body)?).await
    }
}

/// Wire form of one batch item; the body is form-encoded
fn batch_item_json(item: &BatchItem) -> Value {
    let mut json = Map::new();
    json.insert("method".into(), item.method.as_str().into());
    json.insert("relative_url".into(), item.relative_url.clone().into());
    if let Some(body) = &item.body {
        json.insert("body".into(), form_encode(body).into());
    }
    if let Some(name) = &item.name {
        json.insert("name".into(), name.clone().into());
    }
    if let Some(depends_on) = &item.depends_on {
        json.insert("depends_on".into(), depends_on.clone().into());
    }
    if let Some(omit) = item.omit_response_on_success {
        json.insert("omit_response_on_success".into(), omit.into());
    }
    if let Some(token) = &item.access_token {
        json.insert("access_token".into(), token.clone().into());
    }
    Value::Object(json)
}

/// Strings are sent as-is, everything else as JSON text
fn form_encode(body: &Map<String, Value>) -> String {
    let mut form = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in body {
        match value {
            Value::String(s) => form.append_pair(key, s),
            other => form.append_pair(key, &other.to_string()),
        };
    }
    form.finish()
}
