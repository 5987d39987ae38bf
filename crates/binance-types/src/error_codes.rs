//! Binance API error code mapping
//!
//! Binance reports failures as `{"code": <negative int>, "msg": "..."}`.
//! This module maps the documented numeric codes to a typed catalogue.

use std::fmt;

/// Binance API error categories (by code range)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// -1000 to -1099: server or network issues
    General,
    /// -1100 to -1199: request issues (parameters, encoding)
    Request,
    /// -2000 to -2099: trading and account issues
    Trading,
    /// Anything outside the documented ranges
    Unknown,
}

impl ErrorCategory {
    /// Categorize a raw numeric code
    pub fn from_code(code: i64) -> Self {
        match code {
            -1099..=-1000 => Self::General,
            -1199..=-1100 => Self::Request,
            -2099..=-2000 => Self::Trading,
            _ => Self::Unknown,
        }
    }
}

/// Known Binance API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinanceErrorCode {
    // === 10xx General server or network issues ===
    /// -1000 UNKNOWN
    Unknown,
    /// -1001 DISCONNECTED
    Disconnected,
    /// -1002 UNAUTHORIZED
    Unauthorized,
    /// -1003 TOO_MANY_REQUESTS
    TooManyRequests,
    /// -1006 UNEXPECTED_RESP
    UnexpectedResponse,
    /// -1007 TIMEOUT
    Timeout,
    /// -1013 INVALID_MESSAGE (filter failure)
    InvalidMessage,
    /// -1014 UNKNOWN_ORDER_COMPOSITION
    UnknownOrderComposition,
    /// -1015 TOO_MANY_ORDERS
    TooManyOrders,
    /// -1016 SERVICE_SHUTTING_DOWN
    ServiceShuttingDown,
    /// -1020 UNSUPPORTED_OPERATION
    UnsupportedOperation,
    /// -1021 INVALID_TIMESTAMP (outside recvWindow)
    InvalidTimestamp,
    /// -1022 INVALID_SIGNATURE
    InvalidSignature,

    // === 11xx Request issues ===
    /// -1100 ILLEGAL_CHARS
    IllegalChars,
    /// -1101 TOO_MANY_PARAMETERS
    TooManyParameters,
    /// -1102 MANDATORY_PARAM_EMPTY_OR_MALFORMED
    MandatoryParamEmptyOrMalformed,
    /// -1103 UNKNOWN_PARAM
    UnknownParam,
    /// -1104 UNREAD_PARAMETERS
    UnreadParameters,
    /// -1105 PARAM_EMPTY
    ParamEmpty,
    /// -1106 PARAM_NOT_REQUIRED
    ParamNotRequired,
    /// -1111 BAD_PRECISION
    BadPrecision,
    /// -1112 NO_DEPTH
    NoDepth,
    /// -1114 TIF_NOT_REQUIRED
    TifNotRequired,
    /// -1115 INVALID_TIF
    InvalidTif,
    /// -1116 INVALID_ORDER_TYPE
    InvalidOrderType,
    /// -1117 INVALID_SIDE
    InvalidSide,
    /// -1118 EMPTY_NEW_CL_ORD_ID
    EmptyNewClientOrderId,
    /// -1119 EMPTY_ORG_CL_ORD_ID
    EmptyOriginalClientOrderId,
    /// -1120 BAD_INTERVAL
    BadInterval,
    /// -1121 BAD_SYMBOL
    BadSymbol,
    /// -1125 INVALID_LISTEN_KEY
    InvalidListenKey,
    /// -1127 MORE_THAN_XX_HOURS
    MoreThanXxHours,
    /// -1128 OPTIONAL_PARAMS_BAD_COMBO
    OptionalParamsBadCombo,
    /// -1130 INVALID_PARAMETER
    InvalidParameter,

    // === 20xx Trading issues ===
    /// -2010 NEW_ORDER_REJECTED
    NewOrderRejected,
    /// -2011 CANCEL_REJECTED
    CancelRejected,
    /// -2013 NO_SUCH_ORDER
    NoSuchOrder,
    /// -2014 BAD_API_KEY_FMT
    BadApiKeyFormat,
    /// -2015 REJECTED_MBX_KEY
    RejectedApiKey,
}

impl BinanceErrorCode {
    /// Look up a numeric code
    pub fn from_code(code: i64) -> Option<Self> {
        let parsed = match code {
            -1000 => Self::Unknown,
            -1001 => Self::Disconnected,
            -1002 => Self::Unauthorized,
            -1003 => Self::TooManyRequests,
            -1006 => Self::UnexpectedResponse,
            -1007 => Self::Timeout,
            -1013 => Self::InvalidMessage,
            -1014 => Self::UnknownOrderComposition,
            -1015 => Self::TooManyOrders,
            -1016 => Self::ServiceShuttingDown,
            -1020 => Self::UnsupportedOperation,
            -1021 => Self::InvalidTimestamp,
            -1022 => Self::InvalidSignature,
            -1100 => Self::IllegalChars,
            -1101 => Self::TooManyParameters,
            -1102 => Self::MandatoryParamEmptyOrMalformed,
            -1103 => Self::UnknownParam,
            -1104 => Self::UnreadParameters,
            -1105 => Self::ParamEmpty,
            -1106 => Self::ParamNotRequired,
            -1111 => Self::BadPrecision,
            -1112 => Self::NoDepth,
            -1114 => Self::TifNotRequired,
            -1115 => Self::InvalidTif,
            -1116 => Self::InvalidOrderType,
            -1117 => Self::InvalidSide,
            -1118 => Self::EmptyNewClientOrderId,
            -1119 => Self::EmptyOriginalClientOrderId,
            -1120 => Self::BadInterval,
            -1121 => Self::BadSymbol,
            -1125 => Self::InvalidListenKey,
            -1127 => Self::MoreThanXxHours,
            -1128 => Self::OptionalParamsBadCombo,
            -1130 => Self::InvalidParameter,
            -2010 => Self::NewOrderRejected,
            -2011 => Self::CancelRejected,
            -2013 => Self::NoSuchOrder,
            -2014 => Self::BadApiKeyFormat,
            -2015 => Self::RejectedApiKey,
            _ => return None,
        };
        Some(parsed)
    }

    /// Numeric code as sent by the exchange
    pub fn code(&self) -> i64 {
        match self {
            Self::Unknown => -1000,
            Self::Disconnected => -1001,
            Self::Unauthorized => -1002,
            Self::TooManyRequests => -1003,
            Self::UnexpectedResponse => -1006,
            Self::Timeout => -1007,
            Self::InvalidMessage => -1013,
            Self::UnknownOrderComposition => -1014,
            Self::TooManyOrders => -1015,
            Self::ServiceShuttingDown => -1016,
            Self::UnsupportedOperation => -1020,
            Self::InvalidTimestamp => -1021,
            Self::InvalidSignature => -1022,
            Self::IllegalChars => -1100,
            Self::TooManyParameters => -1101,
            Self::MandatoryParamEmptyOrMalformed => -1102,
            Self::UnknownParam => -1103,
            Self::UnreadParameters => -1104,
            Self::ParamEmpty => -1105,
            Self::ParamNotRequired => -1106,
            Self::BadPrecision => -1111,
            Self::NoDepth => -1112,
            Self::TifNotRequired => -1114,
            Self::InvalidTif => -1115,
            Self::InvalidOrderType => -1116,
            Self::InvalidSide => -1117,
            Self::EmptyNewClientOrderId => -1118,
            Self::EmptyOriginalClientOrderId => -1119,
            Self::BadInterval => -1120,
            Self::BadSymbol => -1121,
            Self::InvalidListenKey => -1125,
            Self::MoreThanXxHours => -1127,
            Self::OptionalParamsBadCombo => -1128,
            Self::InvalidParameter => -1130,
            Self::NewOrderRejected => -2010,
            Self::CancelRejected => -2011,
            Self::NoSuchOrder => -2013,
            Self::BadApiKeyFormat => -2014,
            Self::RejectedApiKey => -2015,
        }
    }

    /// Error category by code range
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Short description of the error
    pub fn description(&self) -> &'static str {
        match self {
            Self::Unknown => "An unknown error occurred while processing the request",
            Self::Disconnected => "Internal error; unable to process your request",
            Self::Unauthorized => "You are not authorized to execute this request",
            Self::TooManyRequests => "Too many requests queued or request weight exceeded",
            Self::UnexpectedResponse => "An unexpected response was received from the message bus",
            Self::Timeout => "Timeout waiting for response from backend server",
            Self::InvalidMessage => "Request rejected by a symbol filter",
            Self::UnknownOrderComposition => "Unsupported order combination",
            Self::TooManyOrders => "Too many new orders",
            Self::ServiceShuttingDown => "This service is no longer available",
            Self::UnsupportedOperation => "This operation is not supported",
            Self::InvalidTimestamp => "Timestamp for this request is outside of the recvWindow",
            Self::InvalidSignature => "Signature for this request is not valid",
            Self::IllegalChars => "Illegal characters found in a parameter",
            Self::TooManyParameters => "Too many parameters sent for this endpoint",
            Self::MandatoryParamEmptyOrMalformed => "A mandatory parameter was not sent, was empty/null, or malformed",
            Self::UnknownParam => "An unknown parameter was sent",
            Self::UnreadParameters => "Not all sent parameters were read",
            Self::ParamEmpty => "A parameter was empty",
            Self::ParamNotRequired => "A parameter was sent when not required",
            Self::BadPrecision => "Precision is over the maximum defined for this asset",
            Self::NoDepth => "No orders on book for symbol",
            Self::TifNotRequired => "TimeInForce parameter sent when not required",
            Self::InvalidTif => "Invalid timeInForce",
            Self::InvalidOrderType => "Invalid orderType",
            Self::InvalidSide => "Invalid side",
            Self::EmptyNewClientOrderId => "New client order ID was empty",
            Self::EmptyOriginalClientOrderId => "Original client order ID was empty",
            Self::BadInterval => "Invalid interval",
            Self::BadSymbol => "Invalid symbol",
            Self::InvalidListenKey => "This listenKey does not exist",
            Self::MoreThanXxHours => "Lookup interval is too big",
            Self::OptionalParamsBadCombo => "Combination of optional parameters invalid",
            Self::InvalidParameter => "Invalid data sent for a parameter",
            Self::NewOrderRejected => "New order rejected",
            Self::CancelRejected => "Cancel order rejected",
            Self::NoSuchOrder => "Order does not exist",
            Self::BadApiKeyFormat => "API-key format invalid",
            Self::RejectedApiKey => "Invalid API-key, IP, or permissions for action",
        }
    }

    /// True for errors caused by local clock skew against the receive window
    pub fn is_clock_skew(&self) -> bool {
        matches!(self, Self::InvalidTimestamp)
    }

    /// True for errors caused by credentials or signing
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::InvalidSignature
                | Self::BadApiKeyFormat
                | Self::RejectedApiKey
        )
    }
}

impl fmt::Display for BinanceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}
