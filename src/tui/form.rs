use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};

use crate::models::{GetupWorkoutType, SwingStyle, SwingWorkoutType, WorkoutForm};
use crate::utils::units::KETTLEBELL_WEIGHTS_KG;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Swings,
    SwingWeight,
    SwingStyle,
    SwingType,
    GetupReps1,
    GetupWeight1,
    GetupReps2,
    GetupWeight2,
    GetupType,
}

impl FormField {
    pub fn all() -> Vec<FormField> {
        vec![
            FormField::Date,
            FormField::Swings,
            FormField::SwingWeight,
            FormField::SwingStyle,
            FormField::SwingType,
            FormField::GetupReps1,
            FormField::GetupWeight1,
            FormField::GetupReps2,
            FormField::GetupWeight2,
            FormField::GetupType,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Date => "Date",
            FormField::Swings => "Swings",
            FormField::SwingWeight => "Swing weight",
            FormField::SwingStyle => "Swing style",
            FormField::SwingType => "Swing workout",
            FormField::GetupReps1 => "Get-ups (bell 1)",
            FormField::GetupWeight1 => "Get-up weight 1",
            FormField::GetupReps2 => "Get-ups (bell 2)",
            FormField::GetupWeight2 => "Get-up weight 2",
            FormField::GetupType => "Get-up workout",
        }
    }

    /// Picked with ←/→ rather than typed.
    pub fn is_choice(&self) -> bool {
        !matches!(
            self,
            FormField::Date | FormField::Swings | FormField::GetupReps1 | FormField::GetupReps2
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Editing,
    Cancel,
    Submit,
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub form: WorkoutForm,
    pub field: FormField,
}

impl FormState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            form: WorkoutForm::new(today),
            field: FormField::Swings,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => return FormOutcome::Cancel,
            KeyCode::Enter => return FormOutcome::Submit,
            KeyCode::Tab | KeyCode::Down => self.field = cycle(&FormField::all(), self.field, true),
            KeyCode::BackTab | KeyCode::Up => {
                self.field = cycle(&FormField::all(), self.field, false)
            }
            KeyCode::Left => self.step(false),
            KeyCode::Right => self.step(true),
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                let accepts = match self.field {
                    FormField::Date => c.is_ascii_digit() || c == '-',
                    _ => c.is_ascii_digit(),
                };
                if accepts {
                    if let Some(text) = self.text_mut() {
                        text.push(c);
                    }
                }
            }
            _ => {}
        }
        FormOutcome::Editing
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Date => Some(&mut self.form.date),
            FormField::Swings => Some(&mut self.form.kettlebell_swings),
            FormField::GetupReps1 => Some(&mut self.form.getup_reps_1),
            FormField::GetupReps2 => Some(&mut self.form.getup_reps_2),
            _ => None,
        }
    }

    fn step(&mut self, forward: bool) {
        let form = &mut self.form;
        match self.field {
            FormField::SwingWeight => {
                form.swing_weight_kg = cycle_weight(&form.swing_weight_kg, forward, false)
            }
            FormField::GetupWeight1 => {
                form.getup_weight_1_kg = cycle_weight(&form.getup_weight_1_kg, forward, false)
            }
            FormField::GetupWeight2 => {
                form.getup_weight_2_kg = cycle_weight(&form.getup_weight_2_kg, forward, true)
            }
            FormField::SwingStyle => {
                form.swing_style = cycle(&SwingStyle::all(), form.swing_style, forward)
            }
            FormField::SwingType => {
                form.swing_workout_type =
                    cycle(&SwingWorkoutType::all(), form.swing_workout_type, forward)
            }
            FormField::GetupType => {
                form.getup_workout_type =
                    cycle(&GetupWorkoutType::all(), form.getup_workout_type, forward)
            }
            _ => {}
        }
    }
}

/// Next or previous entry of `all`, wrapping around.
pub fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let Some(idx) = all.iter().position(|t| *t == current) else {
        return current;
    };
    let next = if forward {
        (idx + 1) % all.len()
    } else {
        (idx + all.len() - 1) % all.len()
    };
    all[next]
}

/// Step through the canonical bell sizes. The field always holds kilograms;
/// an optional field also has an empty "no bell" slot.
fn cycle_weight(current: &str, forward: bool, optional: bool) -> String {
    let mut options: Vec<String> = KETTLEBELL_WEIGHTS_KG.iter().map(|w| w.to_string()).collect();
    if optional {
        options.insert(0, String::new());
    }

    let current = current.trim();
    let idx = options.iter().position(|o| {
        o.as_str() == current
            || matches!((o.parse::<f64>(), current.parse::<f64>()), (Ok(a), Ok(b)) if a == b)
    });
    let next = match idx {
        Some(i) if forward => (i + 1) % options.len(),
        Some(i) => (i + options.len() - 1) % options.len(),
        None if forward => 0,
        None => options.len() - 1,
    };
    options[next].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn weights_cycle_in_kilograms() {
        assert_eq!(cycle_weight("16", true, false), "20");
        assert_eq!(cycle_weight("16.0", false, false), "12");
        assert_eq!(cycle_weight("48", true, false), "8");
        assert_eq!(cycle_weight("", true, true), "8");
        assert_eq!(cycle_weight("8", false, true), "");
    }

    #[test]
    fn typing_only_reaches_text_fields() {
        let mut state = FormState::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        state.handle_key(key(KeyCode::Char('1')));
        state.handle_key(key(KeyCode::Char('x')));
        state.handle_key(key(KeyCode::Char('0')));
        state.handle_key(key(KeyCode::Char('0')));
        assert_eq!(state.form.kettlebell_swings, "100");

        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.field, FormField::SwingWeight);
        state.handle_key(key(KeyCode::Char('9')));
        assert_eq!(state.form.swing_weight_kg, "16");
        state.handle_key(key(KeyCode::Right));
        assert_eq!(state.form.swing_weight_kg, "20");
    }

    #[test]
    fn choice_fields_wrap() {
        let mut state = FormState::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        state.field = FormField::GetupType;
        state.handle_key(key(KeyCode::Left));
        assert_eq!(state.form.getup_workout_type, GetupWorkoutType::Alternating);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), FormOutcome::Submit);
        assert_eq!(state.handle_key(key(KeyCode::Esc)), FormOutcome::Cancel);
    }
}
