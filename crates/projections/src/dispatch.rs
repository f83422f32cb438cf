//! Wire-level query schema and its dispatch onto the engine.

use common::{CategoryKey, OwnerKey};
use domain::{Color, Price};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::categories::CategoryProvider;
use crate::model::{CategoryTotal, MonthPeriod, OutcomeOverview, YearPeriod};
use crate::prices::PriceConverter;
use crate::queries::OutcomeQueries;
use crate::sorting::{OutcomeSortField, SortDescriptor, SortDirection};
use crate::store::OutcomeStore;

/// Sort request as it appears on the wire.
///
/// The field arrives as a string so that an unrecognized name can be
/// rejected with an unsupported-sort error instead of silently falling
/// back to a default ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortRequest {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortRequest {
    fn descriptor(&self) -> Result<SortDescriptor> {
        let field: OutcomeSortField = self.field.parse()?;
        Ok(SortDescriptor::new(field, self.direction))
    }
}

fn resolve_sort(sort: Option<&SortRequest>) -> Result<SortDescriptor> {
    match sort {
        Some(request) => request.descriptor(),
        None => Ok(SortDescriptor::default()),
    }
}

/// The closed set of queries the read model answers.
///
/// One variant per engine operation; transports deserialize into this
/// enum and hand it to [`OutcomeQueries::dispatch`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OutcomeQuery {
    ListMonthWithOutcome {
        owner: OwnerKey,
    },
    ListYearWithOutcome {
        owner: OwnerKey,
    },
    ListMonthCategoryWithOutcome {
        owner: OwnerKey,
        month: MonthPeriod,
    },
    ListYearCategoryWithOutcome {
        owner: OwnerKey,
        year: YearPeriod,
    },
    GetTotalMonthOutcome {
        owner: OwnerKey,
        month: MonthPeriod,
    },
    GetTotalYearOutcome {
        owner: OwnerKey,
        year: YearPeriod,
    },
    GetCategoryName {
        owner: OwnerKey,
        category: CategoryKey,
    },
    GetCategoryColor {
        owner: OwnerKey,
        category: CategoryKey,
    },
    ListMonthOutcomeFromCategory {
        owner: OwnerKey,
        month: MonthPeriod,
        category: Option<CategoryKey>,
        sort: Option<SortRequest>,
        page_index: Option<usize>,
    },
    ListYearOutcomeFromCategory {
        owner: OwnerKey,
        year: YearPeriod,
        category: Option<CategoryKey>,
        sort: Option<SortRequest>,
        page_index: Option<usize>,
    },
    SearchOutcomes {
        owner: OwnerKey,
        text: String,
        sort: Option<SortRequest>,
        page_index: usize,
    },
}

/// Responses, one shape per query family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum QueryResponse {
    Months(Vec<MonthPeriod>),
    Years(Vec<YearPeriod>),
    CategoryTotals(Vec<CategoryTotal>),
    Total(Price),
    CategoryName(String),
    CategoryColor(Color),
    Outcomes(Vec<OutcomeOverview>),
}

impl<S, C, P> OutcomeQueries<S, C, P>
where
    S: OutcomeStore,
    C: CategoryProvider,
    P: PriceConverter,
{
    /// Routes one wire query to the matching engine operation.
    pub async fn dispatch(&self, query: OutcomeQuery) -> Result<QueryResponse> {
        match query {
            OutcomeQuery::ListMonthWithOutcome { owner } => Ok(QueryResponse::Months(
                self.list_months_with_outcome(owner).await?,
            )),
            OutcomeQuery::ListYearWithOutcome { owner } => Ok(QueryResponse::Years(
                self.list_years_with_outcome(owner).await?,
            )),
            OutcomeQuery::ListMonthCategoryWithOutcome { owner, month } => {
                Ok(QueryResponse::CategoryTotals(
                    self.list_month_category_totals(owner, month).await?,
                ))
            }
            OutcomeQuery::ListYearCategoryWithOutcome { owner, year } => {
                Ok(QueryResponse::CategoryTotals(
                    self.list_year_category_totals(owner, year).await?,
                ))
            }
            OutcomeQuery::GetTotalMonthOutcome { owner, month } => Ok(QueryResponse::Total(
                self.total_month_outcome(owner, month).await?,
            )),
            OutcomeQuery::GetTotalYearOutcome { owner, year } => Ok(QueryResponse::Total(
                self.total_year_outcome(owner, year).await?,
            )),
            OutcomeQuery::GetCategoryName { owner, category } => Ok(
                QueryResponse::CategoryName(self.category_name(owner, category).await?),
            ),
            OutcomeQuery::GetCategoryColor { owner, category } => Ok(
                QueryResponse::CategoryColor(self.category_color(owner, category).await?),
            ),
            OutcomeQuery::ListMonthOutcomeFromCategory {
                owner,
                month,
                category,
                sort,
                page_index,
            } => {
                let sort = resolve_sort(sort.as_ref())?;
                Ok(QueryResponse::Outcomes(
                    self.list_month_outcomes(owner, month, category, sort, page_index)
                        .await?,
                ))
            }
            OutcomeQuery::ListYearOutcomeFromCategory {
                owner,
                year,
                category,
                sort,
                page_index,
            } => {
                let sort = resolve_sort(sort.as_ref())?;
                Ok(QueryResponse::Outcomes(
                    self.list_year_outcomes(owner, year, category, sort, page_index)
                        .await?,
                ))
            }
            OutcomeQuery::SearchOutcomes {
                owner,
                text,
                sort,
                page_index,
            } => {
                let sort = resolve_sort(sort.as_ref())?;
                Ok(QueryResponse::Outcomes(
                    self.search_outcomes(owner, &text, sort, page_index).await?,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::OutcomeKey;

    use crate::categories::InMemoryCategoryProvider;
    use crate::error::ProjectionError;
    use crate::prices::StaticRateConverter;
    use crate::record::OutcomeRecord;
    use crate::store::InMemoryOutcomeStore;

    type Engine =
        OutcomeQueries<InMemoryOutcomeStore, InMemoryCategoryProvider, StaticRateConverter>;

    async fn engine_with_one_record(owner: OwnerKey) -> Engine {
        let store = InMemoryOutcomeStore::new();
        store
            .insert(OutcomeRecord::new(
                OutcomeKey::new(),
                owner,
                Price::new(1000, "EUR"),
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                "lunch",
            ))
            .await
            .unwrap();
        OutcomeQueries::new(
            store,
            InMemoryCategoryProvider::new(),
            StaticRateConverter::new("EUR"),
        )
    }

    #[tokio::test]
    async fn dispatches_month_listing() {
        let owner = OwnerKey::new();
        let engine = engine_with_one_record(owner).await;

        let response = engine
            .dispatch(OutcomeQuery::ListMonthWithOutcome { owner })
            .await
            .unwrap();
        match response {
            QueryResponse::Months(months) => {
                assert_eq!(months, vec![MonthPeriod::new(2024, 3).unwrap()]);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn dispatches_search_with_explicit_sort() {
        let owner = OwnerKey::new();
        let engine = engine_with_one_record(owner).await;

        let response = engine
            .dispatch(OutcomeQuery::SearchOutcomes {
                owner,
                text: "LUN".to_string(),
                sort: Some(SortRequest {
                    field: "ByAmount".to_string(),
                    direction: SortDirection::Ascending,
                }),
                page_index: 0,
            })
            .await
            .unwrap();
        match response {
            QueryResponse::Outcomes(rows) => assert_eq!(rows.len(), 1),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_sort_field_fails_with_unsupported() {
        let owner = OwnerKey::new();
        let engine = engine_with_one_record(owner).await;

        let err = engine
            .dispatch(OutcomeQuery::SearchOutcomes {
                owner,
                text: "lunch".to_string(),
                sort: Some(SortRequest {
                    field: "ByMood".to_string(),
                    direction: SortDirection::Ascending,
                }),
                page_index: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::UnsupportedSort(field) if field == "ByMood"
        ));
    }

    #[tokio::test]
    async fn missing_sort_falls_back_to_default_descriptor() {
        let owner = OwnerKey::new();
        let engine = engine_with_one_record(owner).await;

        let response = engine
            .dispatch(OutcomeQuery::ListMonthOutcomeFromCategory {
                owner,
                month: MonthPeriod::new(2024, 3).unwrap(),
                category: None,
                sort: None,
                page_index: None,
            })
            .await
            .unwrap();
        match response {
            QueryResponse::Outcomes(rows) => assert_eq!(rows.len(), 1),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn queries_deserialize_from_wire_json() {
        let owner = OwnerKey::new();
        let engine = engine_with_one_record(owner).await;

        let json = format!(
            r#"{{"type":"GetTotalMonthOutcome","data":{{"owner":"{}","month":{{"year":2024,"month":3}}}}}}"#,
            owner.as_uuid()
        );
        let query: OutcomeQuery = serde_json::from_str(&json).unwrap();
        let response = engine.dispatch(query).await.unwrap();
        match response {
            QueryResponse::Total(total) => assert_eq!(total, Price::new(1000, "EUR")),
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
