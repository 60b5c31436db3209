use crate::common::TestStore;

mod upload {
    use super::*;

    #[test]
    fn uploading_stages_the_bytes_and_records_metadata() {
        let mut t = TestStore::seeded();

        let material = t
            .store
            .add_material("Week 1 Slides", "Intro lecture", "week1.pdf", b"%PDF-1.4 demo")
            .expect("Upload failed");

        assert!(material.id.starts_with("m-"));
        assert_eq!(material.size_bytes, 13);
        assert_eq!(t.store.materials().len(), 1);

        let bytes = t
            .store
            .material_bytes(&material.id)
            .expect("Read failed")
            .expect("Bytes missing");
        assert_eq!(bytes, b"%PDF-1.4 demo");
    }

    #[test]
    fn uploads_are_listed_in_arrival_order() {
        let mut t = TestStore::seeded();

        t.store
            .add_material("Week 1", "", "w1.pdf", b"one")
            .expect("Upload failed");
        t.store
            .add_material("Week 2", "", "w2.pdf", b"two")
            .expect("Upload failed");

        let names: Vec<_> = t.store.materials().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Week 1", "Week 2"]);
    }
}

mod deletion {
    use super::*;

    #[test]
    fn deleting_removes_the_entry_and_revokes_the_bytes() {
        let mut t = TestStore::seeded();
        let material = t
            .store
            .add_material("Week 1", "", "w1.pdf", b"one")
            .expect("Upload failed");

        let deleted = t.store.delete_material(&material.id).expect("Delete failed");

        assert!(deleted);
        assert!(t.store.materials().is_empty());
        assert_eq!(t.store.material_bytes(&material.id).expect("Read failed"), None);
    }

    #[test]
    fn a_second_delete_for_the_same_id_is_a_no_op() {
        let mut t = TestStore::seeded();
        let material = t
            .store
            .add_material("Week 1", "", "w1.pdf", b"one")
            .expect("Upload failed");

        assert!(t.store.delete_material(&material.id).expect("Delete failed"));
        assert!(!t.store.delete_material(&material.id).expect("Delete failed"));
    }

    #[test]
    fn deleting_an_unknown_id_reports_false() {
        let mut t = TestStore::seeded();

        assert!(!t.store.delete_material("m-missing").expect("Delete failed"));
    }

    #[test]
    fn other_materials_survive_a_delete() {
        let mut t = TestStore::seeded();
        let first = t
            .store
            .add_material("Week 1", "", "w1.pdf", b"one")
            .expect("Upload failed");
        let second = t
            .store
            .add_material("Week 2", "", "w2.pdf", b"two")
            .expect("Upload failed");

        t.store.delete_material(&first.id).expect("Delete failed");

        let bytes = t
            .store
            .material_bytes(&second.id)
            .expect("Read failed")
            .expect("Bytes missing");
        assert_eq!(bytes, b"two");
    }
}
