//! The query engine: period listings, category totals, totals, listings
//! and search over the outcome read model.

use std::collections::{BTreeSet, HashMap};

use common::{CategoryKey, OwnerKey};
use domain::{Color, Price};

use crate::Result;
use crate::categories::CategoryProvider;
use crate::error::ProjectionError;
use crate::model::{CategoryTotal, MonthPeriod, OutcomeOverview, YearPeriod};
use crate::paging::take_page;
use crate::prices::PriceConverter;
use crate::record::OutcomeRecord;
use crate::sorting::{OutcomeSortField, SortDescriptor};
use crate::store::{OutcomeFilter, OutcomeStore};

/// Read-only query surface over the outcome store.
///
/// Every operation is scoped to one owner, reads the store, and leans on
/// the price converter for all currency math. Nothing here mutates state.
pub struct OutcomeQueries<S, C, P> {
    store: S,
    categories: C,
    prices: P,
}

impl<S, C, P> OutcomeQueries<S, C, P>
where
    S: OutcomeStore,
    C: CategoryProvider,
    P: PriceConverter,
{
    /// Creates a query engine over the given collaborators.
    pub fn new(store: S, categories: C, prices: P) -> Self {
        Self {
            store,
            categories,
            prices,
        }
    }

    /// Distinct months that have at least one outcome, newest first.
    pub async fn list_months_with_outcome(&self, owner: OwnerKey) -> Result<Vec<MonthPeriod>> {
        let records = self.store.scan(owner, OutcomeFilter::all()).await?;
        let months: BTreeSet<MonthPeriod> =
            records.iter().map(|r| MonthPeriod::from(r.when)).collect();
        Ok(months.into_iter().rev().collect())
    }

    /// Distinct years that have at least one outcome, newest first.
    pub async fn list_years_with_outcome(&self, owner: OwnerKey) -> Result<Vec<YearPeriod>> {
        let records = self.store.scan(owner, OutcomeFilter::all()).await?;
        let years: BTreeSet<YearPeriod> =
            records.iter().map(|r| YearPeriod::from(r.when)).collect();
        Ok(years.into_iter().rev().collect())
    }

    /// Per-category totals for one month, sorted by category name.
    pub async fn list_month_category_totals(
        &self,
        owner: OwnerKey,
        month: MonthPeriod,
    ) -> Result<Vec<CategoryTotal>> {
        let records = self.store.scan(owner, OutcomeFilter::in_period(month)).await?;
        self.category_totals(owner, &records).await
    }

    /// Per-category totals for one year, sorted by category name.
    pub async fn list_year_category_totals(
        &self,
        owner: OwnerKey,
        year: YearPeriod,
    ) -> Result<Vec<CategoryTotal>> {
        let records = self.store.scan(owner, OutcomeFilter::in_period(year)).await?;
        self.category_totals(owner, &records).await
    }

    /// Sum of all outcomes in one month, in the owner's default currency.
    #[tracing::instrument(skip(self), fields(%owner))]
    pub async fn total_month_outcome(&self, owner: OwnerKey, month: MonthPeriod) -> Result<Price> {
        let records = self.store.scan(owner, OutcomeFilter::in_period(month)).await?;
        self.sum_in_default_currency(owner, &records).await
    }

    /// Sum of all outcomes in one year, in the owner's default currency.
    #[tracing::instrument(skip(self), fields(%owner))]
    pub async fn total_year_outcome(&self, owner: OwnerKey, year: YearPeriod) -> Result<Price> {
        let records = self.store.scan(owner, OutcomeFilter::in_period(year)).await?;
        self.sum_in_default_currency(owner, &records).await
    }

    /// Name of a category, or [`ProjectionError::CategoryNotFound`] when
    /// the key is unknown or owned by someone else.
    pub async fn category_name(&self, owner: OwnerKey, category: CategoryKey) -> Result<String> {
        match self.categories.snapshot(owner, category).await? {
            Some(snapshot) => Ok(snapshot.name),
            None => Err(ProjectionError::CategoryNotFound(category)),
        }
    }

    /// Color of a category, or [`ProjectionError::CategoryNotFound`] when
    /// the key is unknown or owned by someone else.
    pub async fn category_color(&self, owner: OwnerKey, category: CategoryKey) -> Result<Color> {
        match self.categories.snapshot(owner, category).await? {
            Some(snapshot) => Ok(snapshot.color),
            None => Err(ProjectionError::CategoryNotFound(category)),
        }
    }

    /// Outcomes of one month, optionally restricted to a category, sorted
    /// and optionally paged.
    #[tracing::instrument(skip(self, sort), fields(%owner))]
    pub async fn list_month_outcomes(
        &self,
        owner: OwnerKey,
        month: MonthPeriod,
        category: Option<CategoryKey>,
        sort: SortDescriptor,
        page_index: Option<usize>,
    ) -> Result<Vec<OutcomeOverview>> {
        let filter = OutcomeFilter::in_period(month).with_category(category);
        self.listing(owner, filter, sort, page_index).await
    }

    /// Outcomes of one year, optionally restricted to a category, sorted
    /// and optionally paged.
    #[tracing::instrument(skip(self, sort), fields(%owner))]
    pub async fn list_year_outcomes(
        &self,
        owner: OwnerKey,
        year: YearPeriod,
        category: Option<CategoryKey>,
        sort: SortDescriptor,
        page_index: Option<usize>,
    ) -> Result<Vec<OutcomeOverview>> {
        let filter = OutcomeFilter::in_period(year).with_category(category);
        self.listing(owner, filter, sort, page_index).await
    }

    /// Outcomes whose description contains `text` (case-insensitive).
    /// Search results are always paged.
    #[tracing::instrument(skip(self, sort), fields(%owner))]
    pub async fn search_outcomes(
        &self,
        owner: OwnerKey,
        text: &str,
        sort: SortDescriptor,
        page_index: usize,
    ) -> Result<Vec<OutcomeOverview>> {
        let filter = OutcomeFilter::all().description_contains(text);
        self.listing(owner, filter, sort, Some(page_index)).await
    }

    async fn listing(
        &self,
        owner: OwnerKey,
        filter: OutcomeFilter,
        sort: SortDescriptor,
        page_index: Option<usize>,
    ) -> Result<Vec<OutcomeOverview>> {
        let mut records = self.store.scan(owner, filter).await?;
        self.sort_records(owner, &mut records, sort).await?;
        let records = take_page(records, page_index);
        Ok(records.iter().map(OutcomeOverview::from_record).collect())
    }

    /// Sorts in place. `ByCategory` orders by the name of each record's
    /// first category; records without one sort under the empty name.
    async fn sort_records(
        &self,
        owner: OwnerKey,
        records: &mut [OutcomeRecord],
        sort: SortDescriptor,
    ) -> Result<()> {
        let direction = sort.direction;
        match sort.field {
            OutcomeSortField::ByAmount => {
                records.sort_by(|a, b| direction.orient(a.amount.cents().cmp(&b.amount.cents())));
            }
            OutcomeSortField::ByDescription => {
                records.sort_by(|a, b| direction.orient(a.description.cmp(&b.description)));
            }
            OutcomeSortField::ByWhen => {
                records.sort_by(|a, b| direction.orient(a.when.cmp(&b.when)));
            }
            OutcomeSortField::ByCategory => {
                let names = self.first_category_names(owner, records).await?;
                records.sort_by(|a, b| {
                    let left = Self::sort_name(a, &names);
                    let right = Self::sort_name(b, &names);
                    direction.orient(left.cmp(right))
                });
            }
        }
        Ok(())
    }

    fn sort_name<'a>(record: &OutcomeRecord, names: &'a HashMap<CategoryKey, String>) -> &'a str {
        record
            .first_category()
            .and_then(|key| names.get(&key))
            .map(String::as_str)
            .unwrap_or("")
    }

    async fn first_category_names(
        &self,
        owner: OwnerKey,
        records: &[OutcomeRecord],
    ) -> Result<HashMap<CategoryKey, String>> {
        let mut names = HashMap::new();
        for record in records {
            let Some(key) = record.first_category() else {
                continue;
            };
            if names.contains_key(&key) {
                continue;
            }
            if let Some(snapshot) = self.categories.snapshot(owner, key).await? {
                names.insert(key, snapshot.name);
            }
        }
        Ok(names)
    }

    /// Accumulates converted amounts per category, then resolves metadata.
    ///
    /// A record tagged with several categories contributes its full
    /// converted amount to each of them. Categories whose metadata has
    /// vanished are dropped from the result.
    async fn category_totals(
        &self,
        owner: OwnerKey,
        records: &[OutcomeRecord],
    ) -> Result<Vec<CategoryTotal>> {
        let mut totals: HashMap<CategoryKey, Price> = HashMap::new();
        for record in records {
            let converted = self.prices.to_default(owner, &record.price_fixed()).await?;
            for category in record.categories() {
                let next = match totals.get(category) {
                    Some(total) => total.add(&converted)?,
                    None => converted.clone(),
                };
                totals.insert(*category, next);
            }
        }

        let mut result = Vec::with_capacity(totals.len());
        for (key, total) in totals {
            let Some(snapshot) = self.categories.snapshot(owner, key).await? else {
                continue;
            };
            result.push(CategoryTotal {
                key,
                name: snapshot.name,
                description: snapshot.description,
                color: snapshot.color,
                icon: snapshot.icon,
                total,
            });
        }
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn sum_in_default_currency(
        &self,
        owner: OwnerKey,
        records: &[OutcomeRecord],
    ) -> Result<Price> {
        let mut total = self.prices.zero_default(owner).await?;
        for record in records {
            let converted = self.prices.to_default(owner, &record.price_fixed()).await?;
            total = total.add(&converted)?;
        }
        Ok(total)
    }
}
