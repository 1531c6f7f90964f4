//! Render descriptor for the form.
//!
//! The core never draws anything. A renderer (the browser page, the terminal)
//! consumes a [`FormView`]: which groups exist, where each one is slid to,
//! what every input looks like and which buttons are showing.

use serde::Serialize;

use crate::flow::{SignupStep, StepController};
use crate::form::{FieldName, ROLE_OPTIONS};

pub const CARD_TITLE: &str = "계정을 생성합니다";
pub const CARD_DESCRIPTION: &str = "필수 정보를 입력해주세요.";

/// Kind of input a field renders as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    Text { placeholder: &'static str },
    Password,
    Select {
        placeholder: &'static str,
        options: Vec<&'static str>,
    },
}

/// One labeled input.
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: FieldName,
    pub label: &'static str,
    pub input: InputKind,
    /// Omitted for password inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub filled: bool,
    pub dirty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The fields of one step, slid horizontally into or out of view.
#[derive(Debug, Clone, Serialize)]
pub struct GroupView {
    pub step: SignupStep,
    pub active: bool,
    /// Horizontal offset in percent of the card width.
    pub translate_x: i32,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Advance,
    Submit,
    Retreat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonVariant {
    Primary,
    Ghost,
}

#[derive(Debug, Clone, Serialize)]
pub struct ButtonView {
    pub action: ButtonAction,
    pub label: &'static str,
    pub variant: ButtonVariant,
    pub hidden: bool,
}

/// Everything a renderer needs to draw the current state.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub title: &'static str,
    pub description: &'static str,
    pub step: SignupStep,
    pub groups: Vec<GroupView>,
    pub buttons: Vec<ButtonView>,
}

impl FormView {
    pub fn build(flow: &StepController) -> Self {
        let step = flow.step();
        let page = i32::from(step.index());

        let groups = [SignupStep::Intro, SignupStep::Credentials]
            .into_iter()
            .map(|group| GroupView {
                step: group,
                active: group == step,
                translate_x: match group {
                    SignupStep::Intro => page * -100,
                    SignupStep::Credentials => (1 - page) * 100,
                },
                fields: group
                    .fields()
                    .iter()
                    .map(|&name| field_view(flow, name))
                    .collect(),
            })
            .collect();

        let buttons = vec![
            ButtonView {
                action: ButtonAction::Advance,
                label: "다음 단계로",
                variant: ButtonVariant::Primary,
                hidden: step == SignupStep::Credentials,
            },
            ButtonView {
                action: ButtonAction::Submit,
                label: "계정 생성하기",
                variant: ButtonVariant::Primary,
                hidden: step == SignupStep::Intro,
            },
            ButtonView {
                action: ButtonAction::Retreat,
                label: "이전 단계로",
                variant: ButtonVariant::Ghost,
                hidden: step == SignupStep::Intro,
            },
        ];

        Self {
            title: CARD_TITLE,
            description: CARD_DESCRIPTION,
            step,
            groups,
            buttons,
        }
    }

    pub fn active_group(&self) -> Option<&GroupView> {
        self.groups.iter().find(|g| g.active)
    }
}

fn field_view(flow: &StepController, name: FieldName) -> FieldView {
    let field = flow.form().field(name);
    FieldView {
        name,
        label: label(name),
        input: input_kind(name),
        value: (!name.is_secret()).then(|| field.value.clone()),
        filled: !field.value.is_empty(),
        dirty: field.dirty,
        error: field.error.as_ref().map(|e| e.message().to_string()),
    }
}

fn label(name: FieldName) -> &'static str {
    match name {
        FieldName::Username => "이름",
        FieldName::Email => "이메일",
        FieldName::Phone => "연락처",
        FieldName::Role => "역할",
        FieldName::Password => "비밀번호",
        FieldName::ConfirmPassword => "비밀번호 확인",
    }
}

fn input_kind(name: FieldName) -> InputKind {
    match name {
        FieldName::Username => InputKind::Text { placeholder: "홍길동" },
        FieldName::Email => InputKind::Text {
            placeholder: "hello@sparta-devcamp.com",
        },
        FieldName::Phone => InputKind::Text {
            placeholder: "01000000000",
        },
        FieldName::Role => InputKind::Select {
            placeholder: "역할을 선택해주세요",
            options: ROLE_OPTIONS.to_vec(),
        },
        FieldName::Password | FieldName::ConfirmPassword => InputKind::Password,
    }
}

/// Plain-text rendering of the active group only.
pub fn render_text(view: &FormView) -> String {
    let mut lines = vec![
        format!("# {}", view.title),
        view.description.to_string(),
        String::new(),
    ];

    if let Some(group) = view.active_group() {
        for field in &group.fields {
            let shown = match (&field.input, &field.value) {
                (InputKind::Password, _) if field.filled => "********".to_string(),
                (_, Some(value)) if !value.is_empty() => value.clone(),
                (InputKind::Text { placeholder }, _) => format!("({placeholder})"),
                (InputKind::Select { placeholder, options }, _) => {
                    format!("({placeholder}: {})", options.join(" / "))
                }
                _ => String::new(),
            };
            lines.push(format!("{} [{}]: {}", field.label, field.name, shown));
            if let Some(ref error) = field.error {
                lines.push(format!("  ! {error}"));
            }
        }
    }

    let buttons: Vec<&str> = view
        .buttons
        .iter()
        .filter(|b| !b.hidden)
        .map(|b| b.label)
        .collect();
    lines.push(String::new());
    lines.push(format!("[{}]", buttons.join("] [")));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials_flow() -> StepController {
        let mut flow = StepController::new();
        flow.set_field(FieldName::Username, "홍길동");
        flow.set_field(FieldName::Email, "hello@sparta-devcamp.com");
        flow.set_field(FieldName::Phone, "01012345678");
        flow.set_field(FieldName::Role, "관리자");
        flow.advance().unwrap();
        flow
    }

    fn hidden(view: &FormView, action: ButtonAction) -> bool {
        view.buttons
            .iter()
            .find(|b| b.action == action)
            .map(|b| b.hidden)
            .unwrap()
    }

    #[test]
    fn intro_offsets_and_buttons() {
        let view = FormView::build(&StepController::new());
        assert_eq!(view.groups[0].translate_x, 0);
        assert_eq!(view.groups[1].translate_x, 100);
        assert!(view.groups[0].active);
        assert!(!view.groups[1].active);
        assert!(!hidden(&view, ButtonAction::Advance));
        assert!(hidden(&view, ButtonAction::Submit));
        assert!(hidden(&view, ButtonAction::Retreat));
    }

    #[test]
    fn credentials_offsets_and_buttons() {
        let view = FormView::build(&credentials_flow());
        assert_eq!(view.groups[0].translate_x, -100);
        assert_eq!(view.groups[1].translate_x, 0);
        assert_eq!(view.active_group().unwrap().step, SignupStep::Credentials);
        assert!(hidden(&view, ButtonAction::Advance));
        assert!(!hidden(&view, ButtonAction::Submit));
        assert!(!hidden(&view, ButtonAction::Retreat));
    }

    #[test]
    fn password_values_are_never_exposed() {
        let mut flow = credentials_flow();
        flow.set_field(FieldName::Password, "Abcdef1!");
        let view = FormView::build(&flow);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("Abcdef1!"));

        let password = &view.groups[1].fields[0];
        assert!(password.value.is_none());
        assert!(password.filled);
        assert!(!render_text(&view).contains("Abcdef1!"));
    }

    #[test]
    fn errors_are_rendered_inline() {
        let mut flow = StepController::new();
        flow.set_field(FieldName::Phone, "02012345678");
        let view = FormView::build(&flow);
        let phone = &view.groups[0].fields[2];
        assert_eq!(phone.label, "연락처");
        assert_eq!(
            phone.error.as_deref(),
            Some("010으로 시작하는 11자리 숫자를 입력해주세요")
        );
        assert!(render_text(&view).contains("  ! 010으로 시작하는"));
    }

    #[test]
    fn role_renders_as_select_with_two_options() {
        let view = FormView::build(&StepController::new());
        let role = &view.groups[0].fields[3];
        assert_eq!(
            role.input,
            InputKind::Select {
                placeholder: "역할을 선택해주세요",
                options: vec!["관리자", "일반사용자"],
            }
        );
    }

    #[test]
    fn text_rendering_shows_only_the_active_group() {
        let text = render_text(&FormView::build(&StepController::new()));
        assert!(text.contains("계정을 생성합니다"));
        assert!(text.contains("이름 [username]"));
        assert!(!text.contains("비밀번호"));
        assert!(text.contains("[다음 단계로]"));
        assert!(!text.contains("계정 생성하기"));

        let text = render_text(&FormView::build(&credentials_flow()));
        assert!(text.contains("비밀번호 확인 [confirmPassword]"));
        assert!(!text.contains("이름 [username]"));
        assert!(text.contains("[계정 생성하기] [이전 단계로]"));
    }

    #[test]
    fn view_serializes_step_and_groups() {
        let json = serde_json::to_value(FormView::build(&StepController::new())).unwrap();
        assert_eq!(json["step"], "intro");
        assert_eq!(json["groups"][0]["fields"][0]["name"], "username");
        assert_eq!(json["groups"][0]["fields"][0]["input"]["type"], "text");
        assert_eq!(json["groups"][1]["fields"][1]["name"], "confirmPassword");
    }
}
