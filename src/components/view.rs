use serde::Serialize;

use crate::models::emergency_models::{EmergencyFormProps, FormField, FormState, UserLocation};

pub const TITLE: &str = "Emergency Appointment";
pub const DESCRIPTION: &str =
    "Share your phone number and we will contact you right away with the nearest available care.";
pub const SUBMIT_LABEL: &str = "Request Emergency Appointment";
pub const SUBMITTING_LABEL: &str = "Sending...";
pub const CANCEL_LABEL: &str = "Cancel";
pub const LOCATION_UNAVAILABLE: &str = "Location unavailable";

/// What a rendered control does when the user interacts with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "field", rename_all = "snake_case")]
pub enum ViewAction {
    FieldChange(FormField),
    Submit,
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewNode {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(&'static str, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_event: Option<ViewAction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
}

impl Element {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            on_event: None,
            children: Vec::new(),
        }
    }

    fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    fn on(mut self, action: ViewAction) -> Self {
        self.on_event = Some(action);
        self
    }

    fn child(mut self, node: impl Into<ViewNode>) -> Self {
        self.children.push(node.into());
        self
    }

    fn text(self, text: impl Into<String>) -> Self {
        self.child(ViewNode::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for ViewNode {
    fn from(element: Element) -> Self {
        ViewNode::Element(element)
    }
}

impl ViewNode {
    /// Depth-first search for the first element carrying `action`.
    pub fn find_action(&self, action: &ViewAction) -> Option<&Element> {
        match self {
            ViewNode::Text(_) => None,
            ViewNode::Element(el) if el.on_event.as_ref() == Some(action) => Some(el),
            ViewNode::Element(el) => el.children.iter().find_map(|c| c.find_action(action)),
        }
    }

    /// All text in document order, space separated.
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        match self {
            ViewNode::Text(t) => parts.push(t),
            ViewNode::Element(el) => el.children.iter().for_each(|c| c.collect_text(parts)),
        }
    }
}

fn location_line(location: Option<&UserLocation>) -> String {
    match location {
        Some(UserLocation {
            latitude: Some(lat),
            longitude: Some(lon),
        }) => format!("Your location: {:.4}, {:.4}", lat, lon),
        _ => LOCATION_UNAVAILABLE.to_string(),
    }
}

/// Builds the dialog for the given state. A closed form renders nothing.
pub fn render(state: &FormState, props: &EmergencyFormProps, loading: bool) -> Option<ViewNode> {
    if !props.is_open {
        return None;
    }

    let phone_input = Element::new("input")
        .attr("type", "tel")
        .attr("name", FormField::Phone.name())
        .attr("placeholder", "Enter your phone number")
        .attr("value", state.phone.as_str())
        .attr("required", "true")
        .on(ViewAction::FieldChange(FormField::Phone));

    let mut submit = Element::new("button")
        .attr("type", "submit")
        .attr("class", "emergency-submit")
        .on(ViewAction::Submit);
    if loading {
        submit = submit.attr("disabled", "true").text(SUBMITTING_LABEL);
    } else {
        submit = submit.text(SUBMIT_LABEL);
    }

    let cancel = Element::new("button")
        .attr("type", "button")
        .attr("class", "emergency-cancel")
        .on(ViewAction::Close)
        .text(CANCEL_LABEL);

    let dialog = Element::new("div")
        .attr("class", "modal-content")
        .attr("role", "dialog")
        .child(Element::new("h2").text(TITLE))
        .child(Element::new("p").attr("class", "modal-description").text(DESCRIPTION))
        .child(
            Element::new("p")
                .attr("class", "modal-location")
                .text(location_line(props.user_location.as_ref())),
        )
        .child(
            Element::new("form")
                .child(
                    Element::new("label")
                        .attr("for", FormField::Phone.name())
                        .text("Phone number"),
                )
                .child(phone_input)
                .child(Element::new("div").attr("class", "modal-actions").child(cancel).child(submit)),
        );

    Some(
        Element::new("div")
            .attr("class", "modal-overlay")
            .child(dialog)
            .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_props(location: Option<UserLocation>) -> EmergencyFormProps {
        EmergencyFormProps {
            is_open: true,
            user_location: location,
            user_id: None,
        }
    }

    #[test]
    fn closed_form_renders_nothing() {
        let props = EmergencyFormProps::default();
        assert!(render(&FormState::default(), &props, false).is_none());
    }

    #[test]
    fn phone_input_reflects_state() {
        let state = FormState {
            phone: "9876543210".into(),
            full_name: "Ada".into(),
        };
        let view = render(&state, &open_props(None), false).unwrap();
        let input = view
            .find_action(&ViewAction::FieldChange(FormField::Phone))
            .unwrap();
        assert_eq!(input.get_attr("value"), Some("9876543210"));
        assert_eq!(input.get_attr("type"), Some("tel"));
        // full name is not rendered
        assert!(!view.text_content().contains("Ada"));
        assert!(view.find_action(&ViewAction::FieldChange(FormField::FullName)).is_none());
    }

    #[test]
    fn submit_is_disabled_while_loading() {
        let view = render(&FormState::default(), &open_props(None), true).unwrap();
        let submit = view.find_action(&ViewAction::Submit).unwrap();
        assert_eq!(submit.get_attr("disabled"), Some("true"));
        assert!(view.text_content().contains(SUBMITTING_LABEL));

        let idle = render(&FormState::default(), &open_props(None), false).unwrap();
        let submit = idle.find_action(&ViewAction::Submit).unwrap();
        assert_eq!(submit.get_attr("disabled"), None);
        assert!(idle.text_content().contains(SUBMIT_LABEL));
    }

    #[test]
    fn location_line_shows_coordinates_or_placeholder() {
        let view = render(
            &FormState::default(),
            &open_props(Some(UserLocation::new(12.9716, 77.5946))),
            false,
        )
        .unwrap();
        assert!(view.text_content().contains("12.9716, 77.5946"));

        let partial = UserLocation {
            latitude: Some(12.9),
            longitude: None,
        };
        let view = render(&FormState::default(), &open_props(Some(partial)), false).unwrap();
        assert!(view.text_content().contains(LOCATION_UNAVAILABLE));
    }

    #[test]
    fn cancel_button_closes() {
        let view = render(&FormState::default(), &open_props(None), false).unwrap();
        let cancel = view.find_action(&ViewAction::Close).unwrap();
        assert_eq!(cancel.tag, "button");
    }
}
