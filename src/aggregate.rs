use crate::model::{identity_key, CommitRecord, ContributorStat};
use std::collections::HashMap;

/// Group commits by contributor identity (the lowercased email) in a single
/// pass. Records are applied in input order, so the latest record decides an
/// entry's display name.
pub fn aggregate<I>(records: I) -> HashMap<String, ContributorStat>
where
    I: IntoIterator<Item = CommitRecord>,
{
    let mut map: HashMap<String, ContributorStat> = HashMap::new();
    for record in records {
        map.entry(identity_key(&record.author_email))
            .and_modify(|stat| stat.add_commit(&record))
            .or_insert_with(|| ContributorStat::new(&record));
    }
    map
}
