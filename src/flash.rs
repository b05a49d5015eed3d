/// One-shot user notifications carried across a redirect in a signed cookie
use actix_web::{
    cookie::Cookie, dev::Payload, web, Error, FromRequest, HttpRequest,
};
use futures::future::{ready, Ready};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

pub const FLASH_COOKIE: &str = "connecthub_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: FlashLevel,
    pub message: String,
}

/// Messages pending for the client: those that arrived with the request plus any queued while handling it.
#[derive(Debug, Clone, Default)]
pub struct Flashes {
    messages: Vec<FlashMessage>,
    from_request: bool,
    secret: String,
}

impl Flashes {
    pub fn push(&mut self, category: FlashLevel, message: impl Into<String>) {
        self.messages.push(FlashMessage {
            category,
            message: message.into(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(FlashLevel::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(FlashLevel::Info, message);
    }

    pub fn danger(&mut self, message: impl Into<String>) {
        self.push(FlashLevel::Danger, message);
    }

    pub fn messages(&self) -> &[FlashMessage] {
        &self.messages
    }

    /// Cookie carrying the pending messages to the next page.
    pub fn to_cookie(&self) -> Option<Cookie<'static>> {
        if self.messages.is_empty() {
            return None;
        }
        Some(
            Cookie::build(FLASH_COOKIE, encode(&self.messages, &self.secret))
                .path("/")
                .http_only(true)
                .finish(),
        )
    }

    /// Hands the messages to a rendered page; the cookie must then be cleared if it was set.
    pub fn take(self) -> (Vec<FlashMessage>, bool) {
        (self.messages, self.from_request)
    }
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

fn signature(payload: &str, secret: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(payload.as_bytes());
    Some(mac)
}

/// Cookie value `{hmac_hex}.{urlencoded json}`, signed with `secret`.
pub fn encode(messages: &[FlashMessage], secret: &str) -> String {
    let json = serde_json::to_string(messages).unwrap_or_else(|_| "[]".to_string());
    let payload = urlencoding::encode(&json).into_owned();
    let tag = signature(&payload, secret)
        .map(|mac| hex::encode(mac.finalize().into_bytes()))
        .unwrap_or_default();
    format!("{}.{}", tag, payload)
}

/// Unsigned, tampered or undecodable cookies yield no messages.
pub fn decode(raw: &str, secret: &str) -> Vec<FlashMessage> {
    let Some((tag, payload)) = raw.split_once('.') else {
        return Vec::new();
    };

    let verified = hex::decode(tag)
        .ok()
        .zip(signature(payload, secret))
        .map(|(tag, mac)| mac.verify_slice(&tag).is_ok())
        .unwrap_or(false);
    if !verified {
        tracing::debug!("discarding flash cookie with a bad signature");
        return Vec::new();
    }

    urlencoding::decode(payload)
        .ok()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

impl FromRequest for Flashes {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let secret = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.config.session.secret.clone())
            .unwrap_or_default();

        let flashes = match req.cookie(FLASH_COOKIE) {
            Some(cookie) => Flashes {
                messages: decode(cookie.value(), &secret),
                from_request: true,
                secret,
            },
            None => Flashes {
                secret,
                ..Flashes::default()
            },
        };
        ready(Ok(flashes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    const SECRET: &str = "flash-secret";

    #[test]
    fn test_encode_decode() {
        let mut flashes = Flashes::default();
        flashes.success("Post liked!");
        flashes.danger("Login unsuccessful. Please check email and password.");

        let decoded = decode(&encode(flashes.messages(), SECRET), SECRET);
        assert_eq!(decoded, flashes.messages());
        assert_eq!(decoded[0].category, FlashLevel::Success);
    }

    #[test]
    fn test_garbage_cookie_yields_nothing() {
        assert!(decode("%7Bnot json", SECRET).is_empty());
        assert!(decode("", SECRET).is_empty());
        assert!(decode("zz.%5B%5D", SECRET).is_empty());
    }

    #[test]
    fn test_forged_cookie_yields_nothing() {
        let forged = [FlashMessage {
            category: FlashLevel::Success,
            message: "You won!".into(),
        }];

        // Unsigned payload as a client would write it
        let json = serde_json::to_string(&forged).unwrap();
        let unsigned = urlencoding::encode(&json).into_owned();
        assert!(decode(&unsigned, SECRET).is_empty());
        assert!(decode(&format!(".{}", unsigned), SECRET).is_empty());

        // Signed with a different key
        assert!(decode(&encode(&forged, "other-secret"), SECRET).is_empty());

        // Valid tag, altered payload
        let signed = encode(&forged, SECRET);
        let (tag, _) = signed.split_once('.').unwrap();
        let tampered = format!("{}.{}", tag, unsigned.replace("won", "lost"));
        assert!(decode(&tampered, SECRET).is_empty());
    }

    #[test]
    fn test_no_cookie_when_empty() {
        assert!(Flashes::default().to_cookie().is_none());
    }

    #[actix_web::test]
    async fn test_extracts_pending_messages() {
        let mut pending = Flashes::default();
        pending.info("You have been logged out.");
        let cookie = pending.to_cookie().unwrap();

        let req = TestRequest::default().cookie(cookie).to_http_request();
        let flashes = Flashes::extract(&req).await.unwrap();

        let (messages, from_request) = flashes.take();
        assert!(from_request);
        assert_eq!(messages[0].message, "You have been logged out.");
    }
}
