//! Login/register mode and the field set each mode renders.

/// Form inputs the login page can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Nickname,
    Password,
    Remember,
}

impl Field {
    /// Translation key of the field label.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Email => "emailLabel",
            Self::Nickname => "nicknameLabel",
            Self::Password => "passwordLabel",
            Self::Remember => "rememberMe",
        }
    }

    /// Translation key of the placeholder, also used as the "required" message.
    pub fn placeholder_key(self) -> &'static str {
        match self {
            Self::Email => "emailPlaceholder",
            Self::Nickname => "nicknamePlaceholder",
            Self::Password => "passwordPlaceholder",
            Self::Remember => "rememberMe",
        }
    }
}

const LOGIN_FIELDS: &[Field] = &[Field::Email, Field::Password, Field::Remember];
const REGISTER_FIELDS: &[Field] = &[Field::Email, Field::Nickname, Field::Password];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Login,
    Register,
}

impl FormMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    /// Fields rendered in this mode, in display order.
    pub fn visible_fields(self) -> &'static [Field] {
        match self {
            Self::Login => LOGIN_FIELDS,
            Self::Register => REGISTER_FIELDS,
        }
    }

    pub fn shows(self, field: Field) -> bool {
        self.visible_fields().contains(&field)
    }

    /// Fields that must be non-blank before submitting.
    pub fn required_fields(self) -> impl Iterator<Item = Field> {
        self.visible_fields()
            .iter()
            .copied()
            .filter(|field| *field != Field::Remember)
    }

    pub fn title_key(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    pub fn description_key(self) -> &'static str {
        match self {
            Self::Login => "loginDescription",
            Self::Register => "registerDescription",
        }
    }

    pub fn submit_key(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "continue",
        }
    }

    /// Prompt shown next to the mode switch link.
    pub fn switch_tip_key(self) -> &'static str {
        match self {
            Self::Login => "signInTip",
            Self::Register => "signUpTip",
        }
    }

    /// Label of the mode switch link.
    pub fn switch_action_key(self) -> &'static str {
        match self {
            Self::Login => "signUp",
            Self::Register => "login",
        }
    }
}
