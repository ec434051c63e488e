//! Patient data input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use zeroize::Zeroize;

use crate::application::PatientInput;
use crate::domain::{MortalityModel, Variable};
use crate::tui::styles::{Theme, APP_TITLE};

/// Editable value of a form row.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Dropdown over the category options; starts at the default option.
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
    /// Free text for a continuous variable.
    Text { hint: &'static str, value: String },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub variable: Variable,
    pub value: FieldValue,
}

/// Patient form state
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        Self::new(&MortalityModel::new())
    }
}

impl PatientFormState {
    /// Build one row per model variable, in the model's display order.
    #[must_use]
    pub fn new(model: &MortalityModel) -> Self {
        let mut fields = Vec::with_capacity(model.variable_count());
        for index in 0..model.variable_count() {
            let (Ok(label), Ok(variable)) = (model.variable_name(index), Variable::from_index(index))
            else {
                continue;
            };
            let value = match variable {
                Variable::Categorical(var) => FieldValue::Choice {
                    options: var.options(),
                    selected: 0,
                },
                Variable::Continuous(var) => FieldValue::Text {
                    hint: var.hint(),
                    value: String::new(),
                },
            };
            fields.push(FormField {
                label,
                variable,
                value,
            });
        }

        Self {
            fields,
            selected_field: 0,
            error_message: None,
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current text field
    pub fn input_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.' || c == '-') {
            return;
        }
        if let FieldValue::Text { value, .. } = &mut self.fields[self.selected_field].value {
            value.push(c);
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        if let FieldValue::Text { value, .. } = &mut self.fields[self.selected_field].value {
            value.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        match &mut self.fields[self.selected_field].value {
            FieldValue::Text { value, .. } => value.zeroize(),
            FieldValue::Choice { selected, .. } => *selected = 0,
        }
    }

    /// Step the current dropdown forward or backward, wrapping around.
    pub fn cycle_option(&mut self, forward: bool) {
        if let FieldValue::Choice { options, selected } = &mut self.fields[self.selected_field].value
        {
            let len = options.len();
            *selected = if forward {
                (*selected + 1) % len
            } else {
                (*selected + len - 1) % len
            };
            self.error_message = None;
        }
    }

    /// Wipe all text buffers and put every dropdown back on its default.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            match &mut field.value {
                FieldValue::Text { value, .. } => value.zeroize(),
                FieldValue::Choice { selected, .. } => *selected = 0,
            }
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Collect the form into raw calculator input.
    #[must_use]
    pub fn to_input(&self) -> PatientInput {
        let mut input = PatientInput::default();
        for field in &self.fields {
            match (&field.variable, &field.value) {
                (Variable::Categorical(var), FieldValue::Choice { options, selected }) => {
                    input.set_categorical(*var, options[*selected]);
                }
                (Variable::Continuous(var), FieldValue::Text { value, .. }) => {
                    input.continuous_mut(*var).clone_from(value);
                }
                _ => {}
            }
        }
        input
    }

    /// Load a sample patient (10-year-old, blunt injury, GCS 15)
    pub fn load_sample_data(&mut self) {
        let sample: [(&str, &str); 13] = [
            ("Gender", "Female"),
            ("Supplemental Oxygen", "No"),
            ("Drug Use", "No"),
            ("Race", "White"),
            ("Type of Injury", "Blunt"),
            ("Age", "10"),
            ("AIS Severity", "3"),
            ("Glasgow Coma Score", "15"),
            ("Injury Severity Score", "9"),
            ("Systolic Blood Pressure", "110"),
            ("Pulse Rate", "88"),
            ("Body Temperature", "37.0"),
            ("Blood Oxygen Saturation", "98"),
        ];
        for (label, val) in sample {
            let Some(field) = self.fields.iter_mut().find(|f| f.label == label) else {
                continue;
            };
            match &mut field.value {
                FieldValue::Text { value, .. } => *value = val.to_string(),
                FieldValue::Choice { options, selected } => {
                    if let Some(pos) = options.iter().position(|o| *o == val) {
                        *selected = pos;
                    }
                }
            }
        }
        self.error_message = None;
    }
}

/// Render the patient data input form
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(4), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled(APP_TITLE, Theme::title()),
        Span::styled(" │ Patient Data Entry", Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    // Dropdowns on the left, measurements on the right
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .margin(1)
        .split(area);

    let split = state
        .fields
        .iter()
        .position(|field| matches!(field.variable, Variable::Continuous(_)))
        .unwrap_or(state.fields.len());

    render_field_column(f, columns[0], &state.fields[..split], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[split..],
        split,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let title_style = if is_selected {
            Theme::focused()
        } else {
            Theme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {}: ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let spans = match &field.value {
            FieldValue::Choice { options, selected } => {
                let value_style = if is_selected {
                    Theme::selected()
                } else {
                    Theme::text()
                };
                vec![
                    Span::styled(" ◀ ", Theme::key_hint()),
                    Span::styled(options[*selected], value_style),
                    Span::styled(" ▶", Theme::key_hint()),
                ]
            }
            FieldValue::Text { hint, value } => vec![
                Span::raw(" "),
                if value.is_empty() {
                    Span::styled(*hint, Theme::text_muted())
                } else {
                    Span::styled(value.as_str(), Theme::text())
                },
                if is_selected {
                    Span::styled("▌", Theme::focused())
                } else {
                    Span::raw("")
                },
            ],
        };

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let content = if let Some(err) = &state.error_message {
        Text::styled(err.clone(), Theme::danger())
    } else {
        Text::from(Line::from(vec![
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Navigate ", Theme::key_desc()),
            Span::styled("[←→] ", Theme::key_hint()),
            Span::styled("Choose ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Calculate ", Theme::key_desc()),
            Span::styled("[S] ", Theme::key_hint()),
            Span::styled("Sample ", Theme::key_desc()),
            Span::styled("[Ctrl+R] ", Theme::key_hint()),
            Span::styled("Reset ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Quit", Theme::key_desc()),
        ]))
    };

    let footer = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}
