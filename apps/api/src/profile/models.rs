//! Profile document model. Serialized camelCase, both on the wire and in the
//! JSONB store.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::auth::SessionClaims;

/// One completed match evaluation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub job_title: String,
    pub company_name: String,
    pub job_category: String,
    pub score: u32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImprovementTrend {
    Improving,
    Stable,
    Declining,
    NotEnoughData,
}

/// Derived, denormalized stats summary owned by exactly one profile.
///
/// `average_match_score` is a trailing-window average over the live history,
/// not a lifetime average; `total_analyses` and the strength/weakness
/// frequency tables are lifetime. The count tables persist insertion order
/// so top-10 ties break by first appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_analyses: u64,
    pub highest_match_score: u32,
    pub average_match_score: f64,
    pub analyses_this_month: u32,
    pub analyses_history: Vec<AnalysisRecord>,
    pub top_strengths: Vec<String>,
    pub common_weaknesses: Vec<String>,
    #[serde(default)]
    pub strength_counts: Vec<(String, u32)>,
    #[serde(default)]
    pub weakness_counts: Vec<(String, u32)>,
    pub improvement_trend: ImprovementTrend,
    pub last_active: DateTime<Utc>,
}

impl UserStats {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            total_analyses: 0,
            highest_match_score: 0,
            average_match_score: 0.0,
            analyses_this_month: 0,
            analyses_history: Vec::new(),
            top_strengths: Vec::new(),
            common_weaknesses: Vec::new(),
            strength_counts: Vec::new(),
            weakness_counts: Vec::new(),
            improvement_trend: ImprovementTrend::NotEnoughData,
            last_active: now,
        }
    }
}

/// A resume saved to the profile. Which one is default is recorded solely by
/// `Preferences::default_resume_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResume {
    pub id: String,
    pub name: String,
    pub date_uploaded: DateTime<Utc>,
    pub content: String,
    pub file_size: u64,
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailFrequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Sole source of truth for the default resume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_resume_id: Option<String>,
    pub job_alerts: bool,
    pub email_frequency: EmailFrequency,
    pub theme: Theme,
    pub private_profile: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_resume_id: None,
            job_alerts: true,
            email_frequency: EmailFrequency::Weekly,
            theme: Theme::Dark,
            private_profile: false,
        }
    }
}

/// One profile per authenticated user, keyed by user id. Created lazily with
/// zero-valued defaults on first access; never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub saved_resumes: Vec<SavedResume>,
    #[serde(default)]
    pub saved_jobs: Vec<String>,
    pub preferences: Preferences,
    pub stats: UserStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Zero-valued default profile for a freshly seen user.
    pub fn new_default(claims: &SessionClaims, now: DateTime<Utc>) -> Self {
        let display_name = if !claims.name.is_empty() {
            claims.name.clone()
        } else {
            claims
                .email
                .split('@')
                .next()
                .filter(|s| !s.is_empty())
                .unwrap_or("User")
                .to_string()
        };

        Self {
            user_id: claims.user_id.clone(),
            display_name,
            email: claims.email.clone(),
            photo_url: String::new(),
            profession: None,
            career_level: None,
            target_industry: None,
            target_role: None,
            location: None,
            bio: None,
            skills: Vec::new(),
            saved_resumes: Vec::new(),
            saved_jobs: Vec::new(),
            preferences: Preferences::default(),
            stats: UserStats::new(now),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub profession: Option<String>,
    pub career_level: Option<String>,
    pub target_industry: Option<String>,
    pub target_role: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub preferences: Option<PreferencesUpdate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub default_resume_id: Option<String>,
    pub job_alerts: Option<bool>,
    pub email_frequency: Option<EmailFrequency>,
    pub theme: Option<Theme>,
    pub private_profile: Option<bool>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.photo_url.is_none()
            && self.profession.is_none()
            && self.career_level.is_none()
            && self.target_industry.is_none()
            && self.target_role.is_none()
            && self.location.is_none()
            && self.bio.is_none()
            && self.skills.is_none()
            && self.preferences.is_none()
    }

    pub fn apply(self, profile: &mut UserProfile) {
        if let Some(v) = self.display_name {
            profile.display_name = v;
        }
        if let Some(v) = self.photo_url {
            profile.photo_url = v;
        }
        if let Some(v) = self.profession {
            profile.profession = Some(v);
        }
        if let Some(v) = self.career_level {
            profile.career_level = Some(v);
        }
        if let Some(v) = self.target_industry {
            profile.target_industry = Some(v);
        }
        if let Some(v) = self.target_role {
            profile.target_role = Some(v);
        }
        if let Some(v) = self.location {
            profile.location = Some(v);
        }
        if let Some(v) = self.bio {
            profile.bio = Some(v);
        }
        if let Some(v) = self.skills {
            profile.skills = v;
        }
        if let Some(p) = self.preferences {
            if let Some(v) = p.default_resume_id {
                profile.preferences.default_resume_id = Some(v);
            }
            if let Some(v) = p.job_alerts {
                profile.preferences.job_alerts = v;
            }
            if let Some(v) = p.email_frequency {
                profile.preferences.email_frequency = v;
            }
            if let Some(v) = p.theme {
                profile.preferences.theme = v;
            }
            if let Some(v) = p.private_profile {
                profile.preferences.private_profile = v;
            }
        }
    }
}

const BASE36: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Opaque record id: millisecond timestamp plus a 7-char random suffix.
pub fn generate_record_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..7)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}", now.timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> SessionClaims {
        SessionClaims {
            user_id: "u1".to_string(),
            email: "jane@example.com".to_string(),
            name: String::new(),
        }
    }

    #[test]
    fn test_default_profile_derives_display_name_from_email() {
        let profile = UserProfile::new_default(&claims(), Utc::now());
        assert_eq!(profile.display_name, "jane");
        assert_eq!(profile.stats.total_analyses, 0);
        assert!(profile.preferences.default_resume_id.is_none());
    }

    #[test]
    fn test_empty_update_detected() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            bio: Some("hi".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_apply_preserves_untouched_fields() {
        let mut profile = UserProfile::new_default(&claims(), Utc::now());
        profile.skills = vec!["rust".to_string()];

        let update = ProfileUpdate {
            display_name: Some("Jane D".to_string()),
            preferences: Some(PreferencesUpdate {
                theme: Some(Theme::Light),
                ..Default::default()
            }),
            ..Default::default()
        };
        update.apply(&mut profile);

        assert_eq!(profile.display_name, "Jane D");
        assert_eq!(profile.skills, vec!["rust"]);
        assert_eq!(profile.preferences.theme, Theme::Light);
        // Unspecified preference fields keep their defaults.
        assert!(profile.preferences.job_alerts);
    }

    #[test]
    fn test_record_id_shape() {
        let now = Utc::now();
        let id = generate_record_id(now);
        let (millis, suffix) = id.split_once('-').unwrap();
        assert_eq!(millis, now.timestamp_millis().to_string());
        assert_eq!(suffix.len(), 7);
    }

    #[test]
    fn test_trend_serializes_kebab_case() {
        let json = serde_json::to_string(&ImprovementTrend::NotEnoughData).unwrap();
        assert_eq!(json, "\"not-enough-data\"");
        let json = serde_json::to_string(&ImprovementTrend::Improving).unwrap();
        assert_eq!(json, "\"improving\"");
    }

    #[test]
    fn test_profile_round_trips_through_json() {
        let profile = UserProfile::new_default(&claims(), Utc::now());
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("userId").is_some());
        assert!(value.get("savedResumes").is_some());
        let back: UserProfile = serde_json::from_value(value).unwrap();
        assert_eq!(back.user_id, profile.user_id);
    }
}
