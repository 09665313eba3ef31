const DB_PATH: &str = "./events.sqlite";

fn init(db: &rusqlite::Connection) -> rusqlite::Result<()> {
    db.execute(
        "CREATE TABLE IF NOT EXISTS events (
            band TEXT NOT NULL,
            city TEXT NOT NULL,
            date TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}

pub(crate) fn open_db(reset: bool) -> anyhow::Result<rusqlite::Connection> {
    let db = rusqlite::Connection::open(DB_PATH)?;
    init(&db)?;

    if reset {
        db.execute("DELETE FROM events", ())?;
        tracing::info!("Reset DB");
    }

    Ok(db)
}

#[cfg(test)]
pub(crate) fn open_in_memory() -> anyhow::Result<rusqlite::Connection> {
    let db = rusqlite::Connection::open_in_memory()?;
    init(&db)?;
    Ok(db)
}

pub(crate) fn exists(db: &rusqlite::Connection, event: &crate::Event) -> anyhow::Result<bool> {
    let mut stmt = db.prepare(
        "SELECT EXISTS(
            SELECT 1 FROM events WHERE band = ?1 AND city = ?2 AND date = ?3
        )",
    )?;

    Ok(stmt.query_row((&event.band, &event.city, &event.date), |row| row.get(0))?)
}

pub(crate) fn insert_event(db: &rusqlite::Connection, event: &crate::Event) -> anyhow::Result<()> {
    db.execute(
        "INSERT INTO events (band, city, date) VALUES (?1, ?2, ?3)",
        (&event.band, &event.city, &event.date),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(band: &str, city: &str, date: &str) -> crate::Event {
        crate::Event {
            band: band.to_string(),
            city: city.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn saved_event_exists() {
        let db = open_in_memory().unwrap();
        let metallica = event("Metallica", "Berlin", "2025-05-01");

        assert!(!exists(&db, &metallica).unwrap());
        insert_event(&db, &metallica).unwrap();
        assert!(exists(&db, &metallica).unwrap());
    }

    #[test]
    fn any_differing_field_means_not_seen() {
        let db = open_in_memory().unwrap();
        insert_event(&db, &event("Metallica", "Berlin", "2025-05-01")).unwrap();

        assert!(!exists(&db, &event("Iron Maiden", "Berlin", "2025-05-01")).unwrap());
        assert!(!exists(&db, &event("Metallica", "Hamburg", "2025-05-01")).unwrap());
        assert!(!exists(&db, &event("Metallica", "Berlin", "2025-06-01")).unwrap());
    }

    #[test]
    fn comparison_is_exact_not_normalized() {
        let db = open_in_memory().unwrap();
        insert_event(&db, &event("Metallica", "Berlin", "2025-05-01")).unwrap();

        assert!(!exists(&db, &event("metallica", "Berlin", "2025-05-01")).unwrap());
    }
}
