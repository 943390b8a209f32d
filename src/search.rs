use crate::models::Lead;

/// Case-insensitive search over name, channel and the space-joined tag list.
///
/// A blank query matches every lead.
pub fn matches(lead: &Lead, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }

    lead.name.to_lowercase().contains(&q)
        || lead.channel.to_lowercase().contains(&q)
        || lead.tags.join(" ").to_lowercase().contains(&q)
}

/// Leads matching `query`, in input order.
pub fn filter<'a>(leads: &'a [Lead], query: &str) -> Vec<&'a Lead> {
    leads.iter().filter(|lead| matches(lead, query)).collect()
}
