//! Learning-material descriptors handed to the viewer by the course shell

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Pdf,
    Image,
    Slide,
    Link,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Pdf => "PDF",
            Self::Image => "Image",
            Self::Slide => "Slides",
            Self::Link => "Link",
        }
    }

    /// Slides are delivered as paginated documents
    pub fn is_paginated(self) -> bool {
        matches!(self, Self::Pdf | Self::Slide)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Length in seconds, used by the simulated video clock
    #[serde(default)]
    pub duration: Option<f64>,
}

impl ResourceDescriptor {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.url)
    }
}

/// A course file holds either one material or an ordered list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CourseFile {
    Many(Vec<ResourceDescriptor>),
    Single(ResourceDescriptor),
}

impl CourseFile {
    pub fn into_materials(self) -> Vec<ResourceDescriptor> {
        match self {
            Self::Many(materials) => materials,
            Self::Single(material) => vec![material],
        }
    }
}
