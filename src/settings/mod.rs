use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSettings {
    pub kpis: KpiToggles,
    pub graphs: GraphToggles,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KpiToggles {
    pub review_count: bool,
    pub average_rating: bool,
    pub unreplied: bool,
    pub impressions: bool,
    pub phone_clicks: bool,
    pub low_rating: bool,
    pub directions: bool,
    pub website_clicks: bool,
    pub ctr: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphToggles {
    pub review_trend: bool,
    pub reply_rate: bool,
    pub gbp_performance: bool,
    pub review_analytics: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            kpis: KpiToggles::default(),
            graphs: GraphToggles::default(),
        }
    }
}

impl Default for KpiToggles {
    fn default() -> Self {
        Self {
            review_count: true,
            average_rating: true,
            unreplied: true,
            impressions: true,
            phone_clicks: true,
            low_rating: true,
            directions: true,
            website_clicks: true,
            ctr: true,
        }
    }
}

impl Default for GraphToggles {
    fn default() -> Self {
        Self {
            review_trend: true,
            reply_rate: true,
            gbp_performance: true,
            review_analytics: true,
        }
    }
}
