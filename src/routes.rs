//! Application routes and their URL paths.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    SignUp,
    Login,
    Onboarding,
    Dashboard,
    Sos,
    TownSquare,
    PetProfile,
    Map,
    Activity,
    Knowledge,
    AiAssistant,
    Adoption,
    Circles,
    Journal,
    Help,
    Admin,
    Reminders,
    NotFound,
}

impl Route {
    /// Every routable page, in navigation order. `NotFound` has no path.
    pub const ALL: [Self; 18] = [
        Self::Landing,
        Self::SignUp,
        Self::Login,
        Self::Onboarding,
        Self::Dashboard,
        Self::Sos,
        Self::TownSquare,
        Self::PetProfile,
        Self::Map,
        Self::Activity,
        Self::Knowledge,
        Self::AiAssistant,
        Self::Adoption,
        Self::Circles,
        Self::Journal,
        Self::Help,
        Self::Admin,
        Self::Reminders,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::SignUp => "/signup",
            Self::Login => "/login",
            Self::Onboarding => "/onboarding",
            Self::Dashboard => "/dashboard",
            Self::Sos => "/sos",
            Self::TownSquare => "/town-square",
            Self::PetProfile => "/pet-profile",
            Self::Map => "/map",
            Self::Activity => "/activity",
            Self::Knowledge => "/knowledge",
            Self::AiAssistant => "/ai-assistant",
            Self::Adoption => "/adoption",
            Self::Circles => "/circles",
            Self::Journal => "/journal",
            Self::Help => "/help",
            Self::Admin => "/admin",
            Self::Reminders => "/reminders",
            Self::NotFound => "*",
        }
    }

    /// Route for an exact path; anything unrecognised is `NotFound`.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self::ALL.into_iter().find(|route| route.path() == path).unwrap_or(Self::NotFound)
    }

    /// Reachable without an account.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Landing | Self::SignUp | Self::Login | Self::Onboarding)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
