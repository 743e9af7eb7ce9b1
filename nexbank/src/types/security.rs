use serde::{Deserialize, Serialize};

/// Response to `GET /get-security-question`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityQuestionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The fixed security questions offered at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityQuestionChoice {
    PetName,
    MothersMaidenName,
    FirstSchool,
}

impl SecurityQuestionChoice {
    pub const ALL: [SecurityQuestionChoice; 3] =
        [Self::PetName, Self::MothersMaidenName, Self::FirstSchool];

    /// Numeric value the backend expects (1-3).
    pub fn wire_value(self) -> u8 {
        match self {
            Self::PetName => 1,
            Self::MothersMaidenName => 2,
            Self::FirstSchool => 3,
        }
    }

    /// The question text shown to the user.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::PetName => "What is your pet's name?",
            Self::MothersMaidenName => "What is your mother's maiden name?",
            Self::FirstSchool => "What is the name of your first school?",
        }
    }
}

impl std::fmt::Display for SecurityQuestionChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prompt())
    }
}
