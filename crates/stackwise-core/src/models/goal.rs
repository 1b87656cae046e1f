use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A user-stated marketing objective, used to score goal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Goal {
    MainBusiness,
    SideHustle,
    PassiveIncome,
    RetirementProject,
    SkillDevelopment,
    AudienceBuilding,
    ECommerce,
    ContentCreation,
    AffiliateMarketing,
    Other,
}

impl Goal {
    pub fn all() -> &'static [Goal] {
        &[
            Self::MainBusiness,
            Self::SideHustle,
            Self::PassiveIncome,
            Self::RetirementProject,
            Self::SkillDevelopment,
            Self::AudienceBuilding,
            Self::ECommerce,
            Self::ContentCreation,
            Self::AffiliateMarketing,
            Self::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainBusiness => "main_business",
            Self::SideHustle => "side_hustle",
            Self::PassiveIncome => "passive_income",
            Self::RetirementProject => "retirement_project",
            Self::SkillDevelopment => "skill_development",
            Self::AudienceBuilding => "audience_building",
            Self::ECommerce => "e_commerce",
            Self::ContentCreation => "content_creation",
            Self::AffiliateMarketing => "affiliate_marketing",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MainBusiness => "Main Business",
            Self::SideHustle => "Side Hustle",
            Self::PassiveIncome => "Passive Income",
            Self::RetirementProject => "Retirement Project",
            Self::SkillDevelopment => "Skill Development",
            Self::AudienceBuilding => "Audience Building",
            Self::ECommerce => "E-Commerce",
            Self::ContentCreation => "Content Creation",
            Self::AffiliateMarketing => "Affiliate Marketing",
            Self::Other => "Other",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MainBusiness => "Building or growing a primary business",
            Self::SideHustle => "Creating additional income streams",
            Self::PassiveIncome => "Building automated income sources",
            Self::RetirementProject => "Post-career ventures or hobbies",
            Self::SkillDevelopment => "Learning new marketing abilities",
            Self::AudienceBuilding => "Growing followers or subscribers",
            Self::ECommerce => "Selling products online",
            Self::ContentCreation => "Producing blogs, videos, or podcasts",
            Self::AffiliateMarketing => "Earning commissions from promotions",
            Self::Other => "Other marketing goals",
        }
    }
}
