use std::fmt;
use std::str::FromStr;

/// Which field of the backend response carries the text to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKey {
    /// `{"idea": "<string>"}`
    Idea,
    /// `{"parsed": {<attributes>}}`
    Parsed,
}

/// Backend endpoints the client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    FindIdeas,
    Analyze,
    ListGarments,
    AddGarment,
}

impl Endpoint {
    /// Returns the URL path appended to the backend base URL.
    ///
    /// `AddGarment` keeps the `{garment_id}` placeholder unsubstituted.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::FindIdeas => "/api/outfits/find-ideas",
            Endpoint::Analyze => "/api/outfits/analyze",
            Endpoint::ListGarments => "/api/garments/",
            Endpoint::AddGarment => "/api/garments/{garment_id}",
        }
    }

    /// Returns the response field this endpoint is projected onto.
    pub fn response_key(self) -> ResponseKey {
        match self {
            Endpoint::Analyze => ResponseKey::Parsed,
            Endpoint::FindIdeas | Endpoint::ListGarments | Endpoint::AddGarment => {
                ResponseKey::Idea
            }
        }
    }

    /// Short name used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::FindIdeas => "find-ideas",
            Endpoint::Analyze => "analyze",
            Endpoint::ListGarments => "list-garments",
            Endpoint::AddGarment => "add-garment",
        }
    }

    pub fn all() -> &'static [Endpoint] {
        &[
            Endpoint::FindIdeas,
            Endpoint::Analyze,
            Endpoint::ListGarments,
            Endpoint::AddGarment,
        ]
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Endpoint::all()
            .iter()
            .copied()
            .find(|endpoint| endpoint.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Endpoint::all().iter().map(|e| e.name()).collect();
                format!("unknown endpoint '{s}' (expected one of: {})", names.join(", "))
            })
    }
}
