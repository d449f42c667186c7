//! Parse and classify the server's XML replies.
//!
//! Every reply is a `<rsp>` element whose children carry either a
//! message/comment pair or the requested information. The parser keeps the
//! children as-is (name, text, attributes) and classifies the reply into a
//! [`RspKind`].

use quick_xml::events::attributes::Attributes;
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("xml attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("unexpected root element: {0}")]
    UnexpectedRoot(String),
    #[error("unknown response: {0}")]
    UnknownResponse(String),
}

/// One element under `<rsp>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RspElement {
    pub name: String,
    pub text: Option<String>,
    pub attributes: Vec<(String, String)>,
}

impl RspElement {
    /// Value of the named attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// What the server said, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RspKind {
    // error replies
    AbuseSending,
    NoGoodTokenOrSerial,
    MessageNotSent,
    NoCorrectParameters,
    NotV2Rabbit,
    NabcastNotSent,
    TtsNotSent,
    ChorNotSent,
    EarPositionNotSent,
    WebRadioNotSent,
    // confirmations
    NabcastSent,
    MessageSent,
    TtsSent,
    ChorSent,
    EarPositionSent,
    WebRadioSent,
    CommandSent,
    LinkPreview,
    // info replies, recognized by their elements
    EarPosition,
    FriendList,
    ReceivedMsgList,
    Timezone,
    Signature,
    Blacklist,
    RabbitSleep,
    RabbitVersion,
    VoiceList,
    RabbitName,
    LangList,
    /// `<rsp/>` with no children; neither good nor bad.
    Empty,
}

impl RspKind {
    pub fn is_bad(self) -> bool {
        matches!(
            self,
            RspKind::AbuseSending
                | RspKind::NoGoodTokenOrSerial
                | RspKind::MessageNotSent
                | RspKind::NoCorrectParameters
                | RspKind::NotV2Rabbit
                | RspKind::NabcastNotSent
                | RspKind::TtsNotSent
                | RspKind::ChorNotSent
                | RspKind::EarPositionNotSent
                | RspKind::WebRadioNotSent
        )
    }

    pub fn is_good(self) -> bool {
        !self.is_bad() && self != RspKind::Empty
    }
}

/// A parsed server reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRsp {
    kind: RspKind,
    elements: Vec<RspElement>,
}

impl ServerRsp {
    pub fn kind(&self) -> RspKind {
        self.kind
    }

    pub fn is_good(&self) -> bool {
        self.kind.is_good()
    }

    pub fn is_bad(&self) -> bool {
        self.kind.is_bad()
    }

    pub fn elements(&self) -> &[RspElement] {
        &self.elements
    }

    /// All elements with the given name.
    pub fn get_all(&self, name: &str) -> Vec<&RspElement> {
        self.elements.iter().filter(|e| e.name == name).collect()
    }

    /// First element with the given name.
    pub fn first(&self, name: &str) -> Option<&RspElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Text of the first element with the given name.
    pub fn text_of(&self, name: &str) -> Option<&str> {
        self.first(name).and_then(|e| e.text.as_deref())
    }

    pub fn message(&self) -> Option<&str> {
        self.text_of("message")
    }

    pub fn comment(&self) -> Option<&str> {
        self.text_of("comment")
    }
}

/// Parse a raw XML reply into a classified [`ServerRsp`].
pub fn parse(raw: &str) -> Result<ServerRsp, ProtocolError> {
    let mut reader = Reader::from_str(raw);
    let mut elements: Vec<RspElement> = Vec::new();
    let mut current: Option<RspElement> = None;
    let mut depth = 0usize;
    loop {
        match reader.read_event()? {
            XmlEvent::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if depth == 0 {
                    if name != "rsp" {
                        return Err(ProtocolError::UnexpectedRoot(name));
                    }
                } else if depth == 1 {
                    current = Some(element_from(name, e.attributes())?);
                }
                depth += 1;
            }
            XmlEvent::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if depth == 0 {
                    if name != "rsp" {
                        return Err(ProtocolError::UnexpectedRoot(name));
                    }
                } else if depth == 1 {
                    elements.push(element_from(name, e.attributes())?);
                }
            }
            XmlEvent::Text(t) => {
                if depth == 2 {
                    if let Some(cur) = current.as_mut() {
                        let text = t.unescape()?.trim().to_string();
                        if !text.is_empty() {
                            cur.text = Some(text);
                        }
                    }
                }
            }
            XmlEvent::End(_) => {
                depth -= 1;
                if depth == 1 {
                    if let Some(cur) = current.take() {
                        elements.push(cur);
                    }
                }
            }
            XmlEvent::Eof => break,
            _ => {}
        }
    }
    let kind = classify(&elements)?;
    Ok(ServerRsp { kind, elements })
}

fn element_from(name: String, attrs: Attributes) -> Result<RspElement, ProtocolError> {
    let mut attributes = Vec::new();
    for attr in attrs {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(RspElement {
        name,
        text: None,
        attributes,
    })
}

fn classify(elements: &[RspElement]) -> Result<RspKind, ProtocolError> {
    if elements.is_empty() {
        return Ok(RspKind::Empty);
    }
    if let Some(msg) = elements.iter().find(|e| e.name == "message") {
        let code = msg.text.as_deref().unwrap_or("");
        return match code {
            "ABUSESENDING" => Ok(RspKind::AbuseSending),
            "NOGOODTOKENORSERIAL" => Ok(RspKind::NoGoodTokenOrSerial),
            "MESSAGENOTSENT" => Ok(RspKind::MessageNotSent),
            "NOCORRECTPARAMETERS" => Ok(RspKind::NoCorrectParameters),
            "NOTV2RABBIT" => Ok(RspKind::NotV2Rabbit),
            "NABCASTNOTSENT" => Ok(RspKind::NabcastNotSent),
            "TTSNOTSENT" => Ok(RspKind::TtsNotSent),
            "CHORNOTSENT" => Ok(RspKind::ChorNotSent),
            "EARPOSITIONNOTSENT" => Ok(RspKind::EarPositionNotSent),
            "WEBRADIONOTSENT" => Ok(RspKind::WebRadioNotSent),
            "NABCASTSENT" => Ok(RspKind::NabcastSent),
            "MESSAGESENT" => Ok(RspKind::MessageSent),
            "TTSSENT" => Ok(RspKind::TtsSent),
            "CHORSENT" => Ok(RspKind::ChorSent),
            "EARPOSITIONSENT" => Ok(RspKind::EarPositionSent),
            "WEBRADIOSENT" => Ok(RspKind::WebRadioSent),
            "COMMANDSEND" => Ok(RspKind::CommandSent),
            "LINKPREVIEW" => Ok(RspKind::LinkPreview),
            other => Err(ProtocolError::UnknownResponse(other.to_string())),
        };
    }
    // info replies carry no message element; recognize them by shape
    for element in elements {
        let kind = match element.name.as_str() {
            "leftposition" | "rightposition" => Some(RspKind::EarPosition),
            "listfriend" => Some(RspKind::FriendList),
            "listreceivedmsg" => Some(RspKind::ReceivedMsgList),
            "timezone" => Some(RspKind::Timezone),
            "signature" => Some(RspKind::Signature),
            "blacklist" => Some(RspKind::Blacklist),
            "rabbitSleep" => Some(RspKind::RabbitSleep),
            "rabbitVersion" => Some(RspKind::RabbitVersion),
            "voiceListTTS" => Some(RspKind::VoiceList),
            "rabbitName" => Some(RspKind::RabbitName),
            "langListUser" => Some(RspKind::LangList),
            _ => None,
        };
        if let Some(kind) = kind {
            return Ok(kind);
        }
    }
    Err(ProtocolError::UnknownResponse(elements[0].name.clone()))
}
