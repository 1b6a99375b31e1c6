// messaging-api-client/src/types/messenger.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Recipients

/// Who a message is addressed to. Every send needs exactly one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Recipient {
    /// Page-scoped user id (PSID)
    Id { id: String },
    /// Customer matching (closed beta)
    PhoneNumber {
        phone_number: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<Value>,
    },
    /// Checkbox plugin reference
    UserRef { user_ref: String },
    /// Private reply to a visitor post
    PostId { post_id: String },
    /// Private reply to a post comment
    CommentId { comment_id: String },
    OneTimeNotifToken { one_time_notif_token: String },
    NotificationToken { notification_messages_token: String },
}

impl Recipient {
    pub fn id(psid: impl Into<String>) -> Self {
        Self::Id { id: psid.into() }
    }
}

impl From<&str> for Recipient {
    fn from(psid: &str) -> Self {
        Self::id(psid)
    }
}

impl From<String> for Recipient {
    fn from(psid: String) -> Self {
        Self::Id { id: psid }
    }
}

// Messages

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    #[serde(flatten)]
    pub content: MessageContent,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<QuickReply>,
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text(text.into()).into()
    }

    pub fn attachment(attachment: Attachment) -> Self {
        MessageContent::Attachment(attachment).into()
    }

    pub fn with_quick_replies(mut self, quick_replies: Vec<QuickReply>) -> Self {
        self.quick_replies = quick_replies;
        self
    }
}

impl From<MessageContent> for Message {
    fn from(content: MessageContent) -> Self {
        Self {
            content,
            quick_replies: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageContent {
    Text(String),
    Attachment(Attachment),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Audio,
    Video,
    Image,
    File,
}

/// Media reference: a public URL or a previously uploaded attachment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MediaSource {
    Url {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_reusable: Option<bool>,
    },
    AttachmentId { attachment_id: String },
}

impl MediaSource {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url {
            url: url.into(),
            is_reusable: None,
        }
    }

    pub fn attachment_id(id: impl Into<String>) -> Self {
        Self::AttachmentId {
            attachment_id: id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Attachment {
    Audio(MediaSource),
    Video(MediaSource),
    Image(MediaSource),
    File(MediaSource),
    Template(TemplatePayload),
}

impl Attachment {
    pub fn media(media_type: MediaType, source: MediaSource) -> Self {
        match media_type {
            MediaType::Audio => Self::Audio(source),
            MediaType::Video => Self::Video(source),
            MediaType::Image => Self::Image(source),
            MediaType::File => Self::File(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "snake_case")]
pub enum QuickReply {
    Text {
        title: String,
        payload: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
    },
    UserPhoneNumber,
    UserEmail,
}

// Buttons

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebviewHeightRatio {
    Compact,
    Tall,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebviewShareButton {
    Hide,
    Show,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMetadata {
    PlayerId(String),
    ContextId(String),
}

/// Template and persistent menu button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TemplateButton {
    WebUrl {
        title: String,
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        webview_height_ratio: Option<WebviewHeightRatio>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        messenger_extensions: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        webview_share_button: Option<WebviewShareButton>,
    },
    Postback {
        title: String,
        payload: String,
    },
    PhoneNumber {
        title: String,
        /// Phone number in +E.164 format
        payload: String,
    },
    AccountLink {
        url: String,
    },
    AccountUnlink,
    GamePlay {
        title: String,
        /// Serialized JSON handed to the game
        payload: String,
        game_metadata: GameMetadata,
    },
}

impl TemplateButton {
    pub fn web_url(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::WebUrl {
            title: title.into(),
            url: url.into(),
            webview_height_ratio: None,
            messenger_extensions: None,
            fallback_url: None,
            webview_share_button: None,
        }
    }

    pub fn postback(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::Postback {
            title: title.into(),
            payload: payload.into(),
        }
    }
}

// Templates

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DefaultAction {
    WebUrl {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        messenger_extensions: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        webview_height_ratio: Option<WebviewHeightRatio>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback_url: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateElement {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_action: Option<DefaultAction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<TemplateButton>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageAspectRatio {
    Horizontal,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaElementType {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaElement {
    pub media_type: MediaElementType,
    #[serde(flatten)]
    pub source: MediaSource,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<TemplateButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub street_1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tax: Option<f64>,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptElement {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptAttributes {
    pub recipient_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    /// Must be unique per receipt
    pub order_number: String,
    pub currency: String,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ReceiptElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<Adjustment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CouponAttributes {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_pre_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_url_button_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductElement {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessPrivacy {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    NegPos,
    HardEasy,
    DisSat,
    UnlikeLike,
    PoorGreat,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CsatScoreOption {
    OneToFive,
    FiveStars,
    FiveEmojis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NpsScoreOption {
    ZeroToTen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CesScoreOption {
    OneToSeven,
}

/// Scored question kind with its allowed scale
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedbackQuestionKind {
    Csat {
        #[serde(skip_serializing_if = "Option::is_none")]
        score_label: Option<ScoreLabel>,
        #[serde(skip_serializing_if = "Option::is_none")]
        score_option: Option<CsatScoreOption>,
    },
    Nps {
        #[serde(skip_serializing_if = "Option::is_none")]
        score_label: Option<ScoreLabel>,
        #[serde(skip_serializing_if = "Option::is_none")]
        score_option: Option<NpsScoreOption>,
    },
    Ces {
        #[serde(skip_serializing_if = "Option::is_none")]
        score_label: Option<ScoreLabel>,
        #[serde(skip_serializing_if = "Option::is_none")]
        score_option: Option<CesScoreOption>,
    },
    FreeForm {
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
}

/// Only free-form follow-ups are accepted by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowUpQuestion {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FollowUpQuestion {
    pub fn free_form(placeholder: Option<String>) -> Self {
        Self {
            kind: "free_form",
            placeholder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackQuestion {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub kind: FeedbackQuestionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<FollowUpQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackScreen {
    pub questions: Vec<FeedbackQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerFeedbackAttributes {
    pub title: String,
    pub subtitle: String,
    pub button_title: String,
    pub feedback_screens: Vec<FeedbackScreen>,
    pub business_privacy: BusinessPrivacy,
    /// 1 to 7 days; the platform default is 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerInformationAttributes {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
    pub business_privacy: BusinessPrivacy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u8>,
    /// Currently always `SHIPPING`
    pub purpose: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "template_type", rename_all = "snake_case")]
pub enum TemplatePayload {
    Button {
        text: String,
        buttons: Vec<TemplateButton>,
    },
    Generic {
        elements: Vec<TemplateElement>,
        #[serde(skip_serializing_if = "Option::is_none")]
        image_aspect_ratio: Option<ImageAspectRatio>,
    },
    Media {
        elements: Vec<MediaElement>,
    },
    Receipt(ReceiptAttributes),
    OneTimeNotifReq {
        title: String,
        payload: String,
    },
    Coupon(CouponAttributes),
    Product {
        elements: Vec<ProductElement>,
    },
    CustomerFeedback(CustomerFeedbackAttributes),
    CustomerInformation(CustomerInformationAttributes),
}

// Send options and results

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessagingType {
    Response,
    Update,
    MessageTag,
    NonPromotionalSubscription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageTag {
    ConfirmedEventUpdate,
    PostPurchaseUpdate,
    AccountUpdate,
    HumanAgent,
}

/// Per-send options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendOptions {
    /// Defaults to `MESSAGE_TAG` when `tag` is set and `RESPONSE` otherwise
    pub messaging_type: Option<MessagingType>,
    pub tag: Option<MessageTag>,
    pub quick_replies: Vec<QuickReply>,
    pub persona_id: Option<String>,
}

impl SendOptions {
    pub fn tagged(tag: MessageTag) -> Self {
        Self {
            tag: Some(tag),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub recipient_id: Option<String>,
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendSenderActionResponse {
    pub recipient_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderAction {
    MarkSeen,
    TypingOn,
    TypingOff,
}

/// Sender actions can be shown as coming from a persona
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderActionOptions {
    pub persona_id: Option<String>,
}

impl SenderActionOptions {
    pub fn as_persona(persona_id: impl Into<String>) -> Self {
        Self {
            persona_id: Some(persona_id.into()),
        }
    }
}

// Attachment upload

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    Url { url: String, is_reusable: bool },
    File {
        data: messaging_api_common::FileData,
        is_reusable: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadAttachmentResponse {
    pub attachment_id: String,
}

// User profile

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserProfileField {
    Id,
    Name,
    FirstName,
    LastName,
    ProfilePic,
    /// Needs app review
    Locale,
    /// Needs app review
    Timezone,
    /// Needs app review
    Gender,
}

impl UserProfileField {
    pub const DEFAULT: [UserProfileField; 5] = [
        Self::Id,
        Self::Name,
        Self::FirstName,
        Self::LastName,
        Self::ProfilePic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::ProfilePic => "profile_pic",
            Self::Locale => "locale",
            Self::Timezone => "timezone",
            Self::Gender => "gender",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub timezone: Option<f64>,
    #[serde(default)]
    pub gender: Option<String>,
}

// Messenger profile

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistentMenuItem {
    pub locale: String,
    #[serde(default)]
    pub composer_input_disabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub call_to_actions: Vec<TemplateButton>,
}

impl PersistentMenuItem {
    pub fn default_locale(call_to_actions: Vec<TemplateButton>) -> Self {
        Self {
            locale: "default".to_string(),
            composer_input_disabled: false,
            call_to_actions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub locale: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceBreaker {
    pub question: String,
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetStarted {
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeUrl {
    pub url: String,
    pub webview_height_ratio: WebviewHeightRatio,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webview_share_button: Option<WebviewShareButton>,
    pub in_test: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessengerProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_started: Option<GetStarted>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_menu: Option<Vec<PersistentMenuItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<Vec<Greeting>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice_breakers: Option<Vec<IceBreaker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelisted_domains: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_linking_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_url: Option<HomeUrl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessengerProfileField {
    GetStarted,
    PersistentMenu,
    Greeting,
    IceBreakers,
    WhitelistedDomains,
    AccountLinkingUrl,
    HomeUrl,
}

impl MessengerProfileField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetStarted => "get_started",
            Self::PersistentMenu => "persistent_menu",
            Self::Greeting => "greeting",
            Self::IceBreakers => "ice_breakers",
            Self::WhitelistedDomains => "whitelisted_domains",
            Self::AccountLinkingUrl => "account_linking_url",
            Self::HomeUrl => "home_url",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserPersistentMenu {
    #[serde(default)]
    pub user_level_persistent_menu: Option<Vec<PersistentMenuItem>>,
    #[serde(default)]
    pub page_level_persistent_menu: Option<Vec<PersistentMenuItem>>,
}

// Graph objects

/// Response of profile, menu and settings mutations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MutationSuccessResponse {
    pub result: String,
}

/// `{"success": true}` style acknowledgement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Cursors {
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub cursors: Option<Cursors>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// One page of a Graph API collection
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl<T> Page<T> {
    /// Cursor for the next page, if there is one
    pub fn next_cursor(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .filter(|p| p.next.is_some())
            .and_then(|p| p.cursors.as_ref())
            .and_then(|c| c.after.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    pub name: String,
    pub profile_picture_url: String,
}

impl Persona {
    pub fn new(name: impl Into<String>, profile_picture_url: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            profile_picture_url: profile_picture_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageInfo {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenType {
    Page,
    App,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenInfo {
    pub app_id: String,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub application: String,
    #[serde(default)]
    pub data_access_expires_at: Option<i64>,
    pub expires_at: i64,
    pub is_valid: bool,
    #[serde(default)]
    pub issued_at: Option<i64>,
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageTagInfo {
    pub tag: MessageTag,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureReviewStatus {
    Pending,
    Rejected,
    Approved,
    Limited,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessagingFeatureReview {
    pub feature: String,
    pub status: FeatureReviewStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubscriptionField {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessengerSubscription {
    pub object: String,
    pub callback_url: String,
    pub active: bool,
    #[serde(default)]
    pub fields: Vec<SubscriptionField>,
}

/// Webhook subscription for the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionOptions {
    /// Defaults to `page`
    pub object: String,
    pub callback_url: String,
    pub verify_token: String,
    pub fields: Vec<String>,
    pub include_values: Option<bool>,
}

impl SubscriptionOptions {
    pub const DEFAULT_FIELDS: [&'static str; 8] = [
        "messages",
        "messaging_postbacks",
        "messaging_optins",
        "messaging_referrals",
        "messaging_handovers",
        "messaging_policy_enforcement",
        "message_deliveries",
        "message_reads",
    ];

    pub fn new(callback_url: impl Into<String>, verify_token: impl Into<String>) -> Self {
        Self {
            object: "page".to_string(),
            callback_url: callback_url.into(),
            verify_token: verify_token.into(),
            fields: Self::DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            include_values: None,
        }
    }
}

// Built-in NLP

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NlpModel {
    Custom,
    Chinese,
    Croatian,
    Danish,
    Dutch,
    English,
    FrenchStandard,
    GermanStandard,
    Hebrew,
    Hungarian,
    Irish,
    ItalianStandard,
    Korean,
    NorwegianBokmal,
    Polish,
    Portuguese,
    Romanian,
    Spanish,
    Swedish,
    Vietnamese,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NlpConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nlp_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<NlpModel>,
    /// Wit.ai server token, for the `CUSTOM` model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    /// Number of entity candidates returned, 1 to 8
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_best: Option<u8>,
}

// Insights

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightMetric {
    BlockedConversationsUnique,
    ReportedConversationsUnique,
    TotalMessagingConnections,
    NewConversationsUnique,
}

impl InsightMetric {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BlockedConversationsUnique => "page_messages_blocked_conversations_unique",
            Self::ReportedConversationsUnique => "page_messages_reported_conversations_unique",
            Self::TotalMessagingConnections => "page_messages_total_messaging_connections",
            Self::NewConversationsUnique => "page_messages_new_conversations_unique",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsightOptions {
    pub since: Option<chrono::DateTime<chrono::Utc>>,
    pub until: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InsightValue {
    pub value: Value,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Insight {
    pub name: String,
    pub period: String,
    #[serde(default)]
    pub values: Vec<InsightValue>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

// Batch

/// One call inside a Graph batch request. Pure data: no dependency resolution
/// or response splitting happens client-side.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub method: http::Method,
    pub relative_url: String,
    /// Object body, form-encoded on the wire; nested values become JSON text
    pub body: Option<serde_json::Map<String, Value>>,
    pub name: Option<String>,
    pub depends_on: Option<String>,
    pub omit_response_on_success: Option<bool>,
    pub access_token: Option<String>,
}

impl BatchItem {
    pub fn new(method: http::Method, relative_url: impl Into<String>) -> Self {
        Self {
            method,
            relative_url: relative_url.into(),
            body: None,
            name: None,
            depends_on: None,
            omit_response_on_success: None,
            access_token: None,
        }
    }

    pub fn with_body(mut self, body: serde_json::Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn depends_on(mut self, name: impl Into<String>) -> Self {
        self.depends_on = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchHeader {
    pub name: String,
    pub value: String,
}

/// Result of one batch item, as returned by the Graph API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchResponse {
    pub code: u16,
    #[serde(default)]
    pub headers: Vec<BatchHeader>,
    #[serde(default)]
    pub body: Option<String>,
}

impl BatchResponse {
    /// Parse the item's body, which the API returns as JSON text
    pub fn json(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}
