//! List the identifiers the contact form accepts.

use hydra_studios_core::{NO_STUDIO_PREFERENCE, ProjectType, StudioId};

/// Log every project type and studio with its display label.
pub fn list() {
    tracing::info!("Project types:");
    for project in ProjectType::ALL {
        tracing::info!("  {:<12} {}", project.id(), project.label());
    }

    tracing::info!("Studios:");
    tracing::info!("  {:<12} {}", "(none)", NO_STUDIO_PREFERENCE);
    for studio in StudioId::ALL {
        tracing::info!("  {:<12} {}", studio.id(), studio.label());
    }
}
