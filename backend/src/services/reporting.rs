//! Reporting service for analytics and data export
//!
//! Provides barangay damage summaries (incident aggregates plus estimated
//! peso value at risk via the shared valuation estimator) and CSV export of
//! crop records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use shared::estimate_value_range;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
    sack_kg: Decimal,
    bunch_kg: Decimal,
}

/// Incident aggregates for one barangay
#[derive(Debug, Serialize, sqlx::FromRow)]
struct BarangayIncidentRow {
    barangay: String,
    incident_count: i64,
    pending_count: i64,
    verified_count: i64,
    total_affected_ha: Decimal,
}

/// Crop volumes feeding the value-at-risk estimate
#[derive(Debug, sqlx::FromRow)]
struct CropVolumeRow {
    barangay: String,
    crop_type_id: i32,
    variety_name: String,
    estimated_volume: Option<Decimal>,
    volume_unit: Option<String>,
}

/// Damage summary entry per barangay
#[derive(Debug, Serialize)]
pub struct BarangayDamageSummary {
    pub barangay: String,
    pub incident_count: i64,
    pub pending_count: i64,
    pub verified_count: i64,
    pub total_affected_ha: Decimal,
    pub crops_at_risk: i64,
    /// Peso bounds over standing (unharvested) crop volumes; zero when no
    /// record in the barangay produced an estimate
    pub value_at_risk_low: Decimal,
    pub value_at_risk_high: Decimal,
}

/// Flattened crop record for CSV export
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct CropExportRow {
    pub id: Uuid,
    pub barangay: String,
    pub crop_type_id: i32,
    pub variety_name: String,
    pub planted_date: NaiveDate,
    pub estimated_harvest_date: Option<NaiveDate>,
    pub estimated_volume: Option<Decimal>,
    pub volume_unit: Option<String>,
    pub estimated_hectares: Option<Decimal>,
    pub harvested: bool,
    pub harvested_date: Option<NaiveDate>,
}

/// Report filter parameters
#[derive(Debug, Default, Deserialize)]
pub struct ReportFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub barangay: Option<String>,
}

impl ReportingService {
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            sack_kg: Decimal::from(config.valuation.sack_kg),
            bunch_kg: Decimal::from(config.valuation.bunch_kg),
        }
    }

    /// Barangay damage report: incident aggregates joined with the estimated
    /// value of standing crops in each barangay.
    ///
    /// Keyed by incidents: a barangay appears only when it has at least one
    /// incident inside the date range. Standing-crop value at risk is then
    /// summed over that barangay's active unharvested records; barangays
    /// with crops but no reported incident are out of scope here.
    pub async fn get_damage_report(
        &self,
        filter: &ReportFilter,
    ) -> AppResult<Vec<BarangayDamageSummary>> {
        let start = filter
            .start_date
            .unwrap_or(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        let end = filter
            .end_date
            .unwrap_or(NaiveDate::from_ymd_opt(2100, 12, 31).unwrap());

        let incident_rows = sqlx::query_as::<_, BarangayIncidentRow>(
            r#"
            SELECT
                barangay,
                COUNT(*) as incident_count,
                COUNT(*) FILTER (WHERE status = 'pending') as pending_count,
                COUNT(*) FILTER (WHERE status = 'verified') as verified_count,
                COALESCE(SUM(affected_area_ha), 0) as total_affected_ha
            FROM calamity_incidents
            WHERE reported_at::date BETWEEN $1 AND $2
              AND ($3::text IS NULL OR barangay = $3)
            GROUP BY barangay
            ORDER BY incident_count DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(&filter.barangay)
        .fetch_all(&self.db)
        .await?;

        let crop_rows = sqlx::query_as::<_, CropVolumeRow>(
            r#"
            SELECT barangay, crop_type_id, variety_name, estimated_volume, volume_unit
            FROM crop_records
            WHERE archived = FALSE AND harvested = FALSE
              AND ($1::text IS NULL OR barangay = $1)
            "#,
        )
        .bind(&filter.barangay)
        .fetch_all(&self.db)
        .await?;

        let summaries = incident_rows
            .into_iter()
            .map(|row| {
                let mut crops_at_risk = 0i64;
                let mut low = Decimal::ZERO;
                let mut high = Decimal::ZERO;

                for crop in crop_rows.iter().filter(|c| c.barangay == row.barangay) {
                    crops_at_risk += 1;
                    let estimate = crop.estimated_volume.and_then(|volume| {
                        estimate_value_range(
                            crop.crop_type_id,
                            &crop.variety_name,
                            "",
                            volume,
                            crop.volume_unit.as_deref().unwrap_or("kg"),
                            Some(self.sack_kg),
                            Some(self.bunch_kg),
                        )
                    });
                    // Records without an estimate still count as at risk
                    if let Some(estimate) = estimate {
                        low += estimate.low_value;
                        high += estimate.high_value;
                    }
                }

                BarangayDamageSummary {
                    barangay: row.barangay,
                    incident_count: row.incident_count,
                    pending_count: row.pending_count,
                    verified_count: row.verified_count,
                    total_affected_ha: row.total_affected_ha,
                    crops_at_risk,
                    value_at_risk_low: low,
                    value_at_risk_high: high,
                }
            })
            .collect();

        Ok(summaries)
    }

    /// Fetch crop records for CSV export
    pub async fn get_crop_export_rows(
        &self,
        filter: &ReportFilter,
    ) -> AppResult<Vec<CropExportRow>> {
        let start = filter
            .start_date
            .unwrap_or(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        let end = filter
            .end_date
            .unwrap_or(NaiveDate::from_ymd_opt(2100, 12, 31).unwrap());

        let rows = sqlx::query_as::<_, CropExportRow>(
            r#"
            SELECT id, barangay, crop_type_id, variety_name, planted_date,
                   estimated_harvest_date, estimated_volume, volume_unit,
                   estimated_hectares, harvested, harvested_date
            FROM crop_records
            WHERE archived = FALSE
              AND planted_date BETWEEN $1 AND $2
              AND ($3::text IS NULL OR barangay = $3)
            ORDER BY barangay, planted_date DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(&filter.barangay)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Serialize report rows to CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization failed: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("CSV encoding error: {}", e)))?;
        Ok(csv_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> CropExportRow {
        CropExportRow {
            id: Uuid::nil(),
            barangay: "Poblacion".to_string(),
            crop_type_id: 1,
            variety_name: "NSIC Rc 222".to_string(),
            planted_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            estimated_harvest_date: NaiveDate::from_ymd_opt(2024, 4, 10),
            estimated_volume: Some("120.5".parse().unwrap()),
            volume_unit: Some("sacks".to_string()),
            estimated_hectares: None,
            harvested: false,
            harvested_date: None,
        }
    }

    #[test]
    fn test_csv_export_header_and_row_shape() {
        let csv_data = ReportingService::export_to_csv(&[sample_row()]).unwrap();
        let mut lines = csv_data.lines();

        assert_eq!(
            lines.next().unwrap(),
            "id,barangay,crop_type_id,variety_name,planted_date,estimated_harvest_date,\
             estimated_volume,volume_unit,estimated_hectares,harvested,harvested_date"
        );
        assert_eq!(
            lines.next().unwrap(),
            "00000000-0000-0000-0000-000000000000,Poblacion,1,NSIC Rc 222,2024-01-01,\
             2024-04-10,120.5,sacks,,false,"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_export_one_line_per_record() {
        let rows = vec![sample_row(), sample_row(), sample_row()];
        let csv_data = ReportingService::export_to_csv(&rows).unwrap();
        // Header plus one line per record
        assert_eq!(csv_data.lines().count(), 4);
    }

    #[test]
    fn test_csv_export_empty_input_is_empty() {
        let csv_data = ReportingService::export_to_csv::<CropExportRow>(&[]).unwrap();
        assert!(csv_data.is_empty());
    }
}
