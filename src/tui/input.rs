//! Single-line text inputs.

use zeroize::Zeroize;

/// One editable line. The buffer is wiped, not just cleared, when taken or
/// reset, since it can hold patient names and file paths.
#[derive(Debug, Default)]
pub struct TextField {
    value: String,
    max_chars: Option<usize>,
}

impl TextField {
    #[must_use]
    pub fn with_limit(max_chars: usize) -> Self {
        Self {
            value: String::new(),
            max_chars: Some(max_chars),
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn push(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if self
            .max_chars
            .is_some_and(|max| self.value.chars().count() >= max)
        {
            return;
        }
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    /// Return the contents and wipe the field.
    pub fn take(&mut self) -> String {
        let out = self.value.clone();
        self.value.zeroize();
        out
    }

    pub fn clear(&mut self) {
        self.value.zeroize();
    }
}

impl Drop for TextField {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// Add-patient form: name then age.
#[derive(Debug, Default)]
pub struct PatientForm {
    pub name: TextField,
    pub age: TextField,
    pub age_focused: bool,
    pub error: Option<String>,
}

impl PatientForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: TextField::with_limit(60),
            age: TextField::with_limit(3),
            age_focused: false,
            error: None,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        if self.age_focused {
            &mut self.age
        } else {
            &mut self.name
        }
    }

    pub fn switch_focus(&mut self) {
        self.age_focused = !self.age_focused;
    }

    pub fn clear_sensitive(&mut self) {
        self.name.clear();
        self.age.clear();
        self.age_focused = false;
        self.error = None;
    }
}
