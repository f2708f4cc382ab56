use wasm_bindgen::prelude::*;

/// The portfolio planets, in keyboard-cycling order.
pub const MANIFEST: &str = include_str!("../assets/planets.json");

galaxy_web::export_galaxy!(MANIFEST, "portfolio-galaxy");

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_nav::{EntityKind, RegistryManifest};
    use galaxy_web::GalaxyRunner;

    #[test]
    fn manifest_loads_five_planets() {
        let (registry, _) = RegistryManifest::from_json(MANIFEST).unwrap().into_parts().unwrap();
        let ids: Vec<_> = registry.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, ["frontend", "ai", "timeline", "projects", "about"]);

        let ai = registry.get(&"ai".into()).unwrap();
        assert_eq!(ai.kind, EntityKind::Conversational);
        let timeline = registry.get(&"timeline".into()).unwrap();
        assert_eq!(timeline.kind, EntityKind::Timeline);
        assert!(registry.iter().all(|p| p.is_orbiting()));
        assert!(registry.get(&"timeline".into()).unwrap().ring.is_none());
    }

    #[test]
    fn visiting_every_planet_unlocks_voyager() {
        let mut runner = GalaxyRunner::from_manifest(MANIFEST).unwrap();
        for id in ["frontend", "ai", "timeline", "projects", "about"] {
            runner.select(id);
            runner.tick(1.0 / 60.0);
        }
        let session: serde_json::Value = serde_json::from_str(&runner.session_json()).unwrap();
        assert_eq!(session["visited"].as_array().unwrap().len(), 5);
        assert_eq!(session["badges"][0]["id"], "cosmic-voyager");
    }
}
