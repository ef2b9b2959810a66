//! Dependency rules for the task list backend.
//!
//! Each rule names the files it governs (a path prefix under `backend/src`,
//! minus any carved-out sub-trees) and the references those files may not
//! contain.

use std::path::Path;

/// Something a source file may refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// An external crate, matched on the first path segment.
    Crate(&'static str),
    /// A top-level module of the backend crate itself.
    Module(&'static str),
    /// A named item (trait, type) wherever it appears in a path. Mockall
    /// doubles named `Mock<item>` count as the item.
    Item(&'static str),
}

impl Target {
    pub(crate) fn describe(self) -> String {
        match self {
            Self::Crate(name) => format!("crate `{name}`"),
            Self::Module(name) => format!("module `crate::{name}`"),
            Self::Item(name) => format!("`{name}`"),
        }
    }
}

/// A single dependency restriction.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Files at or below this path are governed by the rule.
    pub scope: &'static str,
    /// Sub-trees of `scope` the rule does not reach.
    pub exempt: &'static [&'static str],
    pub forbidden: &'static [Target],
    /// Printed with every finding.
    pub reason: &'static str,
}

impl Rule {
    pub(crate) fn governs(&self, file: &Path) -> bool {
        file.starts_with(self.scope) && !self.exempt.iter().any(|dir| file.starts_with(dir))
    }
}

const DATABASE: &[Target] = &[
    Target::Crate("diesel"),
    Target::Crate("diesel_async"),
    Target::Crate("diesel_migrations"),
];

/// Rules enforced by [`crate::check_tree`].
pub const RULES: &[Rule] = &[
    Rule {
        scope: "domain",
        exempt: &[],
        forbidden: &[
            Target::Module("inbound"),
            Target::Module("outbound"),
            Target::Crate("actix_web"),
            Target::Crate("actix_http"),
            Target::Crate("utoipa"),
            Target::Crate("utoipa_swagger_ui"),
            Target::Crate("diesel"),
            Target::Crate("diesel_async"),
            Target::Crate("diesel_migrations"),
            Target::Crate("jsonwebtoken"),
            Target::Crate("bcrypt"),
        ],
        reason: "the domain model stays free of adapters and frameworks",
    },
    Rule {
        scope: "inbound",
        exempt: &[],
        forbidden: &[
            Target::Module("outbound"),
            Target::Crate("diesel"),
            Target::Crate("diesel_async"),
            Target::Crate("jsonwebtoken"),
            Target::Crate("bcrypt"),
        ],
        reason: "handlers talk to ports, never to adapters",
    },
    Rule {
        scope: "inbound",
        exempt: &[],
        forbidden: &[
            Target::Item("TaskRepository"),
            Target::Item("UserRepository"),
            Target::Item("PasswordHasher"),
        ],
        reason: "handlers reach records through the task and credential services, \
                 which apply the access policy",
    },
    Rule {
        scope: "outbound",
        exempt: &[],
        forbidden: &[
            Target::Module("inbound"),
            Target::Crate("actix_web"),
            Target::Crate("actix_http"),
            Target::Crate("utoipa"),
        ],
        reason: "adapters know nothing about HTTP",
    },
    Rule {
        scope: "outbound",
        exempt: &["outbound/token"],
        forbidden: &[Target::Crate("jsonwebtoken")],
        reason: "JWT handling lives in outbound::token",
    },
    Rule {
        scope: "outbound",
        exempt: &["outbound/crypto"],
        forbidden: &[Target::Crate("bcrypt")],
        reason: "password hashing lives in outbound::crypto",
    },
    Rule {
        scope: "outbound",
        exempt: &["outbound/persistence"],
        forbidden: DATABASE,
        reason: "SQL access lives in outbound::persistence",
    },
];
