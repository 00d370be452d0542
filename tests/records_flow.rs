use chrono::{NaiveDate, NaiveTime};
use depotmaton::ledger::{
    Attachment, AttachmentStore, CalendarEvent, Contact, ContactStore, EventStore,
    HabitTracker, LedgerError,
};

// Stores are plain values handed to whoever needs them
fn schedule_delivery(
    contacts: &ContactStore,
    events: &mut EventStore,
    supplier: &str,
    date: NaiveDate,
) -> Result<uuid::Uuid, LedgerError> {
    let contact = contacts
        .search(supplier)
        .into_iter()
        .next()
        .ok_or_else(|| LedgerError::UserError(format!("no supplier {}", supplier)))?;
    let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let end = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
    let event = CalendarEvent::timed(&format!("Delivery from {}", contact.name), date, start, end)?;
    Ok(events.insert(event))
}

#[test]
fn supplier_delivery_with_receipt() {
    let mut contacts = ContactStore::new();
    let mut events = EventStore::new();
    let mut attachments = AttachmentStore::new();
    contacts.insert(Contact::new("Boulangerie Saint-Marc").unwrap());

    let date = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();
    let event_id = schedule_delivery(&contacts, &mut events, "saint-marc", date).unwrap();
    attachments.insert(Attachment::new("bon-de-livraison.pdf", 4096, Some(event_id)).unwrap());

    let today = events.on_date(date);
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].title, "Delivery from Boulangerie Saint-Marc");
    assert_eq!(attachments.for_owner(event_id).len(), 1);

    events.remove(event_id).unwrap();
    assert_eq!(attachments.remove_for_owner(event_id), 1);
    assert!(events.remove(event_id).is_err());
    assert!(schedule_delivery(&contacts, &mut events, "nobody", date).is_err());
}

#[test]
fn closing_checklist_streak() {
    let mut habits = HabitTracker::new();
    let first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    for day in first.iter_days().take(5) {
        habits.toggle("Count the till", day);
    }
    let fifth = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();
    assert_eq!(habits.streak("Count the till", fifth), 5);

    let third = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
    habits.toggle("Count the till", third);
    assert_eq!(habits.streak("Count the till", fifth), 2);
    assert_eq!(habits.count_between("Count the till", first, fifth), 4);
}
