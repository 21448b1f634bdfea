//! Domain layer: request builders, validation rules and response shapes (no I/O).

mod evaluation;
mod event;
mod request;
mod response;
mod validation;
mod value;

pub use evaluation::{InputEvaluation, Rule};
pub use event::CallCompleted;
pub use request::stage;
pub use request::{
    ApiSurface, AuthPlacement, CreateUserRequest, CreateUserRequestBuilder,
    GetConversationRequest, GetDialNumbersRequest, GetUserConversationsRequest,
    GetUserConversationsRequestBuilder, HttpMethod, Psd2Request, Psd2RequestBuilder, RequestBody,
    SerializationError, UpdateApplicationRequest, UpdateThemeRequest, UpdateThemeRequestBuilder,
    VerifyCheckRequest, VerifyCheckRequestBuilder, VerifyControlRequest,
    VerifyControlRequestBuilder, VerifyOptions, VerifyRequest, VerifyRequestBuilder,
    VerifySearchRequest, VonageRequest,
};
pub use response::{
    Application, Conversation, ConversationProperties, ConversationState, DialInNumber,
    EmbeddedConversations, HalLink, HalLinks, ProblemDetails, ResponseError, Theme, ThemeDomain,
    Timestamps, User, UserConversation, UserConversationMember, UserConversations,
    UserProperties, VerifyCheckResponse, VerifyControlResponse, VerifyResponse, VerifySearchCheck,
    VerifySearchEvent, VerifySearchResponse,
};
pub use validation::{
    ValidationError, ValidationErrorKind, verify_higher_or_equal_than,
    verify_length_lower_or_equal_than, verify_lower_or_equal_than, verify_not_empty,
    verify_not_nil, verify_phone_number, verify_positive,
};
pub use value::{
    ApiKey, ApiSecret, BearerToken, Color, FetchOrder, MemberState, PhoneNumber, VerifyCommand,
    VerifyWorkflow,
};
