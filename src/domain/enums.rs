/// Dashboard page currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Timer,
    Blocker,
}

impl Page {
    /// Tab label
    pub fn name(&self) -> &'static str {
        match self {
            Page::Timer => "Timer",
            Page::Blocker => "Website Blocker",
        }
    }

    /// Page shown after pressing Tab
    pub fn next(&self) -> Self {
        match self {
            Page::Timer => Page::Blocker,
            Page::Blocker => Page::Timer,
        }
    }

    pub fn all() -> &'static [Page] {
        &[Page::Timer, Page::Blocker]
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    EditingTimerMinutes,
    EditingSessionMinutes,
    AddingSite,
    Modal,
}

/// What the input form is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    TimerMinutes,
    SessionMinutes,
    AddSite,
}

impl FormKind {
    pub fn ui_mode(&self) -> UiMode {
        match self {
            FormKind::TimerMinutes => UiMode::EditingTimerMinutes,
            FormKind::SessionMinutes => UiMode::EditingSessionMinutes,
            FormKind::AddSite => UiMode::AddingSite,
        }
    }

    /// Number of fields shown in the form
    pub fn field_count(&self) -> usize {
        match self {
            FormKind::AddSite => 2,
            _ => 1,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormKind::TimerMinutes => " Set Custom Time ",
            FormKind::SessionMinutes => " Focus Session Length ",
            FormKind::AddSite => " Block a Website ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_cycle() {
        assert_eq!(Page::Timer.next(), Page::Blocker);
        assert_eq!(Page::Blocker.next(), Page::Timer);
        assert_eq!(Page::all().len(), 2);
    }

    #[test]
    fn test_form_kind() {
        assert_eq!(FormKind::AddSite.field_count(), 2);
        assert_eq!(FormKind::TimerMinutes.field_count(), 1);
        assert_eq!(FormKind::SessionMinutes.ui_mode(), UiMode::EditingSessionMinutes);
    }
}
