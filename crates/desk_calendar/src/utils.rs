use bevy::prelude::*;

/// Despawns every entity tagged with `C`, children included.
pub fn despawn_all<C: Component>(mut commands: Commands, tagged: Query<Entity, With<C>>) {
    for entity in &tagged {
        commands.entity(entity).despawn();
    }
}

pub fn remove_resource<R: Resource>(mut commands: Commands) {
    commands.remove_resource::<R>();
}
