use std::{
    collections::BTreeMap,
    fmt::Display,
    str::FromStr,
    sync::{Arc, LazyLock},
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{error::ManifestError, GLAZED_1_21_4_URL, GLAZED_1_21_5_URL};

/// A file every target has to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    MeteorClient,
    Baritone,
    Glazed,
}

impl Role {
    /// Download order.
    pub const REQUIRED: [Role; 3] = [Role::MeteorClient, Role::Baritone, Role::Glazed];

    pub fn name(self) -> &'static str {
        match self {
            Role::MeteorClient => "meteor-client",
            Role::Baritone => "baritone",
            Role::Glazed => "glazed",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::REQUIRED
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| format!("unknown file role `{s}`"))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

pub type TargetFiles = BTreeMap<Role, String>;

/// Game version to download links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    targets: BTreeMap<String, TargetFiles>,
}

static BUILTIN: LazyLock<Arc<Manifest>> = LazyLock::new(|| {
    Arc::new(Manifest::new([
        (
            "1.21.4",
            [
                (Role::MeteorClient, "https://glazedclient.com/1.21.4/meteor-client-1.21.4-42.jar"),
                (Role::Baritone, "https://glazedclient.com/1.21.4/baritone-meteor-1.21.4.jar"),
                (Role::Glazed, GLAZED_1_21_4_URL),
            ],
        ),
        (
            "1.21.5",
            [
                (Role::MeteorClient, "https://glazedclient.com/1.21.5/meteor-client-1.21.5-54.jar"),
                (Role::Baritone, "https://glazedclient.com/1.21.5/baritone-meteor-1.21.5.jar"),
                (Role::Glazed, GLAZED_1_21_5_URL),
            ],
        ),
    ]))
});

impl Manifest {
    pub fn new<T, F, U>(targets: impl IntoIterator<Item = (T, F)>) -> Self
    where
        T: Into<String>,
        F: IntoIterator<Item = (Role, U)>,
        U: Into<String>,
    {
        Self {
            targets: targets
                .into_iter()
                .map(|(target, files)| {
                    let files = files.into_iter().map(|(role, url)| (role, url.into())).collect();
                    (target.into(), files)
                })
                .collect(),
        }
    }

    /// The manifest compiled into the installer.
    pub fn builtin() -> Arc<Manifest> {
        BUILTIN.clone()
    }

    pub fn required_roles() -> &'static [Role] {
        &Role::REQUIRED
    }

    pub fn urls_for(&self, target_version: &str) -> Option<&TargetFiles> {
        self.targets.get(target_version)
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    /// Checks that `target_version` provides every required role and returns
    /// the download list in [`Role::REQUIRED`] order.
    pub fn validate(&self, target_version: &str) -> Result<Vec<(Role, &str)>, ManifestError> {
        let files = self
            .urls_for(target_version)
            .ok_or_else(|| ManifestError::UnknownTarget(target_version.to_owned()))?;

        let missing = Self::required_roles()
            .iter()
            .copied()
            .filter(|role| !files.contains_key(role))
            .collect::<Vec<_>>();

        if missing.contains(&Role::Glazed) {
            return Err(ManifestError::CoreMissing);
        }
        if !missing.is_empty() {
            return Err(ManifestError::MissingRoles(missing));
        }

        Ok(Self::required_roles()
            .iter()
            .filter_map(|role| files.get(role).map(|url| (*role, url.as_str())))
            .collect())
    }
}

/// Last path segment of `url`, ignoring any query or fragment.
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().filter(|name| !name.is_empty())
}
