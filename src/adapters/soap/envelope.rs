//! SOAP envelope construction and response unwrapping.
//!
//! Both halves are pure string work so the wire format can be tested without a
//! server. The client in `client.rs` owns the HTTP round-trip.

use crate::utils::error::{ConvertError, Result};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoapVersion {
    V11,
    V12,
}

impl SoapVersion {
    pub fn envelope_namespace(self) -> &'static str {
        match self {
            SoapVersion::V11 => "http://schemas.xmlsoap.org/soap/envelope/",
            SoapVersion::V12 => "http://www.w3.org/2003/05/soap-envelope",
        }
    }

    /// SOAP 1.2 carries the action inside the content type.
    pub fn content_type(self, action: &str) -> String {
        match self {
            SoapVersion::V11 => "text/xml; charset=utf-8".to_string(),
            SoapVersion::V12 => format!(
                "application/soap+xml; charset=utf-8; action=\"{}\"",
                action
            ),
        }
    }

    /// Value of the `SOAPAction` header, only sent for SOAP 1.1.
    pub fn action_header(self, action: &str) -> Option<String> {
        match self {
            SoapVersion::V11 => Some(format!("\"{}\"", action)),
            SoapVersion::V12 => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeOptions {
    pub version: SoapVersion,
    /// .NET (ASMX) calling convention: default-namespaced operation element,
    /// untyped parameters.
    pub dot_net: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapRequest {
    pub namespace: String,
    pub method: String,
    pub params: Vec<(String, String)>,
}

impl SoapRequest {
    pub fn new(namespace: &str, method: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            method: method.to_string(),
            params: Vec::new(),
        }
    }

    pub fn add_property(mut self, name: &str, value: &str) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }
}

pub fn build_envelope(request: &SoapRequest, options: EnvelopeOptions) -> String {
    let namespace = escape(request.namespace.as_str());
    let mut xml = String::with_capacity(512);

    xml.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    xml.push_str(&format!(
        r#"<soap:Envelope xmlns:xsi="{}" xmlns:xsd="{}" xmlns:soap="{}">"#,
        XSI_NAMESPACE,
        XSD_NAMESPACE,
        options.version.envelope_namespace()
    ));
    xml.push_str("<soap:Header /><soap:Body>");

    let method = if options.dot_net {
        xml.push_str(&format!(r#"<{} xmlns="{}">"#, request.method, namespace));
        request.method.clone()
    } else {
        xml.push_str(&format!(r#"<n0:{} xmlns:n0="{}">"#, request.method, namespace));
        format!("n0:{}", request.method)
    };

    for (name, value) in &request.params {
        if options.dot_net {
            xml.push_str(&format!("<{name}>{}</{name}>", escape(value.as_str())));
        } else {
            xml.push_str(&format!(
                r#"<{name} xsi:type="xsd:string">{}</{name}>"#,
                escape(value.as_str())
            ));
        }
    }

    xml.push_str(&format!("</{}>", method));
    xml.push_str("</soap:Body></soap:Envelope>");
    xml
}

#[derive(Debug, Default)]
struct Node {
    name: String,
    text: String,
    children: Vec<Node>,
}

impl Node {
    fn named(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            ..Default::default()
        }
    }

    fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    fn child_text(&self, path: &[&str]) -> Option<&str> {
        let mut node = self;
        for name in path {
            node = node.child(name)?;
        }
        Some(node.text.as_str())
    }
}

fn parse_tree(xml: &str) -> Result<Node> {
    let mut reader = Reader::from_str(xml);
    // synthetic document root at the bottom of the stack
    let mut stack = vec![Node::default()];

    loop {
        match reader.read_event().map_err(ConvertError::malformed)? {
            Event::Start(start) => stack.push(Node::named(&start)),
            Event::Empty(start) => {
                let node = Node::named(&start);
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ConvertError::malformed("unbalanced closing tag"))?;
                let parent = stack
                    .last_mut()
                    .ok_or_else(|| ConvertError::malformed("unbalanced closing tag"))?;
                parent.children.push(node);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(ConvertError::malformed)?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        return Err(ConvertError::malformed("document ended inside an element"));
    }
    stack
        .pop()
        .ok_or_else(|| ConvertError::malformed("empty document"))
}

fn fault_from(fault: &Node) -> ConvertError {
    // SOAP 1.2 first, then the 1.1 field names
    let code = fault
        .child_text(&["Code", "Value"])
        .or_else(|| fault.child_text(&["faultcode"]))
        .unwrap_or_default();
    let reason = fault
        .child_text(&["Reason", "Text"])
        .or_else(|| fault.child_text(&["faultstring"]))
        .unwrap_or_default();

    ConvertError::SoapFault {
        code: code.trim().to_string(),
        reason: reason.trim().to_string(),
    }
}

/// Text of the first element inside the response wrapper, exactly as sent.
pub fn parse_response(xml: &str) -> Result<String> {
    let document = parse_tree(xml)?;
    let envelope = document
        .child("Envelope")
        .ok_or_else(|| ConvertError::malformed("missing Envelope element"))?;
    let body = envelope
        .child("Body")
        .ok_or_else(|| ConvertError::malformed("missing Body element"))?;
    let payload = body
        .children
        .first()
        .ok_or_else(|| ConvertError::malformed("empty Body element"))?;

    if payload.name == "Fault" {
        return Err(fault_from(payload));
    }

    let result = payload.children.first().ok_or_else(|| {
        ConvertError::malformed(format!("{} carries no result element", payload.name))
    })?;
    Ok(result.text.clone())
}
