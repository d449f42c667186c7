//! Events: everything that can be sent to the Violet server.
//!
//! An event serializes to `key=value` query tokens; the query layer joins
//! them, picks the endpoint and performs the GET. Events validate their
//! arguments at construction, so a built event always serializes (the one
//! exception is an empty choregraphy).

use crate::chor::Choregraphy;
use crate::eval::BadChorDesc;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in query token values: everything that could terminate
/// or splice a token.
const TOKEN_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'=')
    .add(b'?');

fn escape(text: &str) -> String {
    utf8_percent_encode(text, TOKEN_ESCAPE).to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error(transparent)]
    Chor(#[from] BadChorDesc),
    #[error("{0}")]
    InvalidArgument(String),
}

fn invalid(msg: impl Into<String>) -> EventError {
    EventError::InvalidArgument(msg.into())
}

/// A request that can be serialized into query-string tokens, alone or
/// combined with others.
pub trait Event: std::fmt::Debug {
    /// `key=value` tokens for this event.
    fn to_query(&self) -> Result<Vec<String>, EventError>;

    /// Streamed events go to the stream endpoint and cannot be combined.
    fn streamed(&self) -> bool {
        false
    }
}

impl Event for Choregraphy {
    fn to_query(&self) -> Result<Vec<String>, EventError> {
        Ok(Choregraphy::to_query(self)?)
    }
}

/// Move one or both ears to an absolute position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetEarsPosition {
    posleft: Option<i64>,
    posright: Option<i64>,
}

impl SetEarsPosition {
    pub const MIN_POS: i64 = 0;
    pub const MAX_POS: i64 = 16;

    /// At least one of the two positions must be given; each is checked
    /// against [`MIN_POS`](Self::MIN_POS)..=[`MAX_POS`](Self::MAX_POS).
    pub fn new(posleft: Option<i64>, posright: Option<i64>) -> Result<Self, EventError> {
        if posleft.is_none() && posright.is_none() {
            return Err(invalid("at least posleft or posright must be set"));
        }
        for (name, pos) in [("posleft", posleft), ("posright", posright)] {
            if let Some(p) = pos {
                if !(Self::MIN_POS..=Self::MAX_POS).contains(&p) {
                    return Err(invalid(format!(
                        "{} must be between {} and {}",
                        name,
                        Self::MIN_POS,
                        Self::MAX_POS
                    )));
                }
            }
        }
        Ok(SetEarsPosition { posleft, posright })
    }
}

impl Event for SetEarsPosition {
    fn to_query(&self) -> Result<Vec<String>, EventError> {
        let mut url = Vec::new();
        if let Some(p) = self.posleft {
            url.push(format!("posleft={}", p));
        }
        if let Some(p) = self.posright {
            url.push(format!("posright={}", p));
        }
        Ok(url)
    }
}

/// Text-to-speech message, with optional voice tuning and nabcast posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsMessage {
    tts: String,
    speed: Option<i64>,
    pitch: Option<i64>,
    voice: Option<String>,
    nabcast: Option<i64>,
    nabcasttitle: Option<String>,
}

impl TtsMessage {
    pub const MIN_SPEED: i64 = 1;
    pub const MAX_SPEED: i64 = 32_000;
    pub const MIN_PITCH: i64 = 1;
    pub const MAX_PITCH: i64 = 32_000;

    pub fn new(tts: impl Into<String>) -> Self {
        TtsMessage {
            tts: tts.into(),
            speed: None,
            pitch: None,
            voice: None,
            nabcast: None,
            nabcasttitle: None,
        }
    }

    pub fn speed(mut self, speed: i64) -> Result<Self, EventError> {
        if !(Self::MIN_SPEED..=Self::MAX_SPEED).contains(&speed) {
            return Err(invalid(format!(
                "speed values must be between {} and {}",
                Self::MIN_SPEED,
                Self::MAX_SPEED
            )));
        }
        self.speed = Some(speed);
        Ok(self)
    }

    pub fn pitch(mut self, pitch: i64) -> Result<Self, EventError> {
        if !(Self::MIN_PITCH..=Self::MAX_PITCH).contains(&pitch) {
            return Err(invalid(format!(
                "pitch values must be between {} and {}",
                Self::MIN_PITCH,
                Self::MAX_PITCH
            )));
        }
        self.pitch = Some(pitch);
        Ok(self)
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn nabcast(mut self, id: i64) -> Self {
        self.nabcast = Some(id);
        self
    }

    pub fn nabcast_title(mut self, title: impl Into<String>) -> Self {
        self.nabcasttitle = Some(title.into());
        self
    }
}

impl Event for TtsMessage {
    /// Tokens are emitted sorted; text values are percent-escaped.
    fn to_query(&self) -> Result<Vec<String>, EventError> {
        let mut url = vec![format!("tts={}", escape(&self.tts))];
        if let Some(s) = self.speed {
            url.push(format!("speed={}", s));
        }
        if let Some(p) = self.pitch {
            url.push(format!("pitch={}", p));
        }
        if let Some(v) = &self.voice {
            url.push(format!("voice={}", v));
        }
        if let Some(n) = self.nabcast {
            url.push(format!("nabcast={}", n));
        }
        if let Some(t) = &self.nabcasttitle {
            url.push(format!("nabcasttitle={}", escape(t)));
        }
        url.sort();
        Ok(url)
    }
}

/// Play a message by library or personal MP3 id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdMessage {
    idmessage: i64,
    nabcast: Option<i64>,
    nabcasttitle: Option<String>,
}

impl IdMessage {
    pub const MIN_IDMESSAGE: i64 = 1;

    pub fn new(idmessage: i64) -> Result<Self, EventError> {
        if idmessage < Self::MIN_IDMESSAGE {
            return Err(invalid(format!(
                "idmessage must be greater than {}",
                Self::MIN_IDMESSAGE
            )));
        }
        Ok(IdMessage {
            idmessage,
            nabcast: None,
            nabcasttitle: None,
        })
    }

    pub fn nabcast(mut self, id: i64) -> Self {
        self.nabcast = Some(id);
        self
    }

    pub fn nabcast_title(mut self, title: impl Into<String>) -> Self {
        self.nabcasttitle = Some(title.into());
        self
    }
}

impl Event for IdMessage {
    fn to_query(&self) -> Result<Vec<String>, EventError> {
        let mut url = vec![format!("idmessage={}", self.idmessage)];
        if let Some(n) = self.nabcast {
            url.push(format!("nabcast={}", n));
        }
        if let Some(t) = &self.nabcasttitle {
            url.push(format!("nabcasttitle={}", escape(t)));
        }
        url.sort();
        Ok(url)
    }
}

/// Play one or more MP3 URLs (podcast or webradio). The only streamed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioStream {
    url_list: Vec<String>,
}

impl AudioStream {
    pub fn new<I, S>(urls: I) -> Result<Self, EventError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let url_list: Vec<String> = urls.into_iter().map(Into::into).collect();
        if url_list.is_empty() {
            return Err(invalid("no urls given"));
        }
        if url_list.iter().any(|u| u.is_empty()) {
            return Err(invalid("empty url"));
        }
        Ok(AudioStream { url_list })
    }

    pub fn urls(&self) -> &[String] {
        &self.url_list
    }
}

impl Event for AudioStream {
    fn to_query(&self) -> Result<Vec<String>, EventError> {
        Ok(vec![format!("urlList={}", self.url_list.join("|"))])
    }

    fn streamed(&self) -> bool {
        true
    }
}

impl std::ops::Add for AudioStream {
    type Output = AudioStream;

    /// Playing `a + b` plays all of `a`'s URLs, then `b`'s.
    fn add(self, rhs: AudioStream) -> AudioStream {
        let mut url_list = self.url_list;
        url_list.extend(rhs.url_list);
        AudioStream { url_list }
    }
}

/// Id-based status and command actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetLinkPreview = 1,
    GetFriendsList,
    GetInboxList,
    GetTimezone,
    GetSignature,
    GetBlacklisted,
    GetRabbitStatus,
    GetRabbitVersion,
    GetLangVoice,
    GetRabbitName,
    GetSelectedLang,
    GetMessagePreview,
    SetRabbitAsleep,
    SetRabbitAwake,
    /// Not an id-based action on the wire; sent as `ears=ok`.
    GetEarsPosition,
}

impl Action {
    pub fn id(self) -> Option<u8> {
        match self {
            Action::GetEarsPosition => None,
            other => Some(other as u8),
        }
    }
}

impl Event for Action {
    fn to_query(&self) -> Result<Vec<String>, EventError> {
        Ok(match self.id() {
            Some(id) => vec![format!("action={}", id)],
            None => vec!["ears=ok".to_string()],
        })
    }
}

/// Several events combined into one request; its tokens are the
/// concatenation of its members' tokens, in order.
#[derive(Debug, Default)]
pub struct EventCollection {
    events: Vec<Box<dyn Event>>,
}

impl EventCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        one: impl Event + 'static,
        another: impl Event + 'static,
    ) -> Result<Self, EventError> {
        let mut collection = Self::new();
        collection.push(one)?;
        collection.push(another)?;
        Ok(collection)
    }

    /// Streamed events cannot be combined.
    pub fn push(&mut self, event: impl Event + 'static) -> Result<&mut Self, EventError> {
        if event.streamed() {
            return Err(invalid("streamed events cannot be combined"));
        }
        self.events.push(Box::new(event));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Event for EventCollection {
    fn to_query(&self) -> Result<Vec<String>, EventError> {
        let mut url = Vec::new();
        for event in &self.events {
            url.extend(event.to_query()?);
        }
        Ok(url)
    }
}
