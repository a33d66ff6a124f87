use serde::{Deserialize, Serialize};

/// Server-assigned contact identifier.
pub type ContactId = i64;

/// Business relationship a contact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ContactCategory {
    #[default]
    Customer,
    Vendor,
    #[serde(rename = "VIP")]
    Vip,
    Partner,
    Employee,
}

impl ContactCategory {
    pub const ALL: &'static [ContactCategory] = &[
        ContactCategory::Customer,
        ContactCategory::Vendor,
        ContactCategory::Vip,
        ContactCategory::Partner,
        ContactCategory::Employee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Vendor => "Vendor",
            Self::Vip => "VIP",
            Self::Partner => "Partner",
            Self::Employee => "Employee",
        }
    }

    /// Parse a category name, ignoring case. Unknown names are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .copied()
    }
}

impl std::fmt::Display for ContactCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted contact as returned by the contacts service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default)]
    pub category: ContactCategory,
}

impl Contact {
    /// Company for display, `-` when absent or blank.
    pub fn company_display(&self) -> &str {
        match self.company.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => "-",
        }
    }

    /// Form payload prefilled from this contact.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            company: self.company.clone(),
            category: self.category,
        }
    }
}

/// Contact fields without an id: the body of create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    #[serde(default)]
    pub category: ContactCategory,
}

impl ContactDraft {
    /// Build a draft from raw form input. Text is trimmed and a blank
    /// company becomes `None`.
    pub fn from_form(
        name: &str,
        email: &str,
        phone: &str,
        company: Option<&str>,
        category: ContactCategory,
    ) -> Self {
        let company = company
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            company,
            category,
        }
    }

    /// Attach a server-assigned id.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            category: self.category,
        }
    }
}
