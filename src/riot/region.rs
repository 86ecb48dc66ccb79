use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Logical game server a player is registered on.
///
/// The vendor splits its API over two kinds of hosts: account identity lives
/// on a continental routing cluster while summoner and league data live on
/// the server's own platform shard. A region resolves to both through
/// [`Region::route`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Br,
    Lan,
    Las,
    Na,
    Jp,
    Kr,
    Eune,
    Euw,
    Me,
    Ru,
    Tr,
    Oce,
    Ph,
    Sg,
    Th,
    Tw,
    Vn,
}

/// The two physical hosts a [`Region`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionRoute {
    routing: &'static str,
    platform: &'static str,
}

impl RegionRoute {
    /// Continental cluster (account-v1).
    pub fn routing(&self) -> &'static str {
        self.routing
    }

    /// Server shard (summoner-v4, league-v4).
    pub fn platform(&self) -> &'static str {
        self.platform
    }
}

impl Region {
    pub const ALL: [Region; 17] = [
        Self::Br,
        Self::Lan,
        Self::Las,
        Self::Na,
        Self::Jp,
        Self::Kr,
        Self::Eune,
        Self::Euw,
        Self::Me,
        Self::Ru,
        Self::Tr,
        Self::Oce,
        Self::Ph,
        Self::Sg,
        Self::Th,
        Self::Tw,
        Self::Vn,
    ];

    pub fn route(self) -> RegionRoute {
        RegionRoute {
            routing: self.routing(),
            platform: self.platform(),
        }
    }

    fn routing(self) -> &'static str {
        match self {
            Self::Br | Self::Lan | Self::Las | Self::Na => "americas",
            Self::Eune | Self::Euw | Self::Me | Self::Ru | Self::Tr => "europe",
            // account-v1 has no sea cluster
            Self::Jp
            | Self::Kr
            | Self::Oce
            | Self::Ph
            | Self::Sg
            | Self::Th
            | Self::Tw
            | Self::Vn => "asia",
        }
    }

    fn platform(self) -> &'static str {
        match self {
            Self::Br => "br1",
            Self::Lan => "la1",
            Self::Las => "la2",
            Self::Na => "na1",
            Self::Jp => "jp1",
            Self::Kr => "kr",
            Self::Eune => "eun1",
            Self::Euw => "euw1",
            Self::Me => "me1",
            Self::Ru => "ru",
            Self::Tr => "tr1",
            Self::Oce => "oc1",
            Self::Ph => "ph2",
            Self::Sg => "sg2",
            Self::Th => "th2",
            Self::Tw => "tw2",
            Self::Vn => "vn2",
        }
    }

    /// Short code used for persistence and display, e.g. `EUW`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Br => "BR",
            Self::Lan => "LAN",
            Self::Las => "LAS",
            Self::Na => "NA",
            Self::Jp => "JP",
            Self::Kr => "KR",
            Self::Eune => "EUNE",
            Self::Euw => "EUW",
            Self::Me => "ME",
            Self::Ru => "RU",
            Self::Tr => "TR",
            Self::Oce => "OCE",
            Self::Ph => "PH",
            Self::Sg => "SG",
            Self::Th => "TH",
            Self::Tw => "TW",
            Self::Vn => "VN",
        }
    }
}

impl FromStr for Region {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BR" | "BR1" => Ok(Self::Br),
            "LAN" | "LA1" => Ok(Self::Lan),
            "LAS" | "LA2" => Ok(Self::Las),
            "NA" | "NA1" => Ok(Self::Na),
            "JP" | "JP1" => Ok(Self::Jp),
            "KR" => Ok(Self::Kr),
            "EUNE" | "EUN" | "EUN1" => Ok(Self::Eune),
            "EUW" | "EUW1" => Ok(Self::Euw),
            "ME" | "ME1" => Ok(Self::Me),
            "RU" => Ok(Self::Ru),
            "TR" | "TR1" => Ok(Self::Tr),
            "OCE" | "OC" | "OC1" => Ok(Self::Oce),
            "PH" | "PH2" => Ok(Self::Ph),
            "SG" | "SG2" => Ok(Self::Sg),
            "TH" | "TH2" => Ok(Self::Th),
            "TW" | "TW2" => Ok(Self::Tw),
            "VN" | "VN2" => Ok(Self::Vn),
            _ => Err(AppError::InvalidRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
