//! Demo data
//!
//! Rebuilds the schema from scratch and loads three users with their posts
//! and tags, then runs the read and update paths once against that data.

use crate::domain::{DomainError, DomainResult, NewPost, NewUser, PostUpdate, UserUpdate};
use crate::repository::{
    drop_tables, run_migrations, DbState, PostRepository, PostTagOperations, Repository,
    TagRepository, UserRepository,
};

/// Repositories over one database, as used by the seeder
pub struct Seeder {
    db: DbState,
    users: UserRepository,
    posts: PostRepository,
    tags: TagRepository,
}

impl Seeder {
    pub fn new(db: DbState) -> Self {
        let conn = db.connection();
        Self {
            users: UserRepository::new(conn.clone()),
            posts: PostRepository::new(conn.clone()),
            tags: TagRepository::new(conn),
            db,
        }
    }

    /// Drop every table, recreate the schema and insert the demo rows
    pub async fn rebuild(&self) -> DomainResult<()> {
        {
            let conn = self.db.connection();
            let conn = conn.lock().await;
            log::info!("Starting to drop tables...");
            drop_tables(&conn)?;
            log::info!("Starting to build tables...");
            run_migrations(&conn)?;
        }

        self.create_initial_users().await?;
        self.create_initial_posts().await?;
        self.create_initial_tags().await?;
        Ok(())
    }

    async fn create_initial_users(&self) -> DomainResult<()> {
        log::info!("Starting to create initial users...");
        for (username, password, name, location) in [
            ("albert", "bertie99", "Albert VanSlingshot", "Memphis, TN"),
            ("sandra", "sandie99", "Sandra Carini", "Jersey City, NJ"),
            ("glamgal", "glamit99", "Simone Walker", "New York, NY"),
        ] {
            self.users
                .create(&NewUser {
                    username: username.to_string(),
                    password: password.to_string(),
                    name: name.to_string(),
                    location: location.to_string(),
                })
                .await?;
        }
        log::info!("Finished creating initial users");
        Ok(())
    }

    async fn create_initial_posts(&self) -> DomainResult<()> {
        let users = self.users.list().await?;
        let [albert, sandra, glamgal] = users.as_slice() else {
            return Err(DomainError::NotFound(format!(
                "expected 3 seeded users, found {}",
                users.len()
            )));
        };

        log::info!("Starting to create posts...");
        let first_post = "This is my first post. I hope I love writing blogs as much as I love writing them.";
        let posts = [
            (albert.id, "First Post", first_post, vec![]),
            (
                sandra.id,
                "Sandy's First Post",
                first_post,
                vec!["#happy", "#worstdayever"],
            ),
            (
                glamgal.id,
                "Worst First Post",
                "This is my worst first post. I am emo.",
                vec!["#happy", "#youcandoanything", "#catmandoanything"],
            ),
        ];
        for (author_id, title, content, tags) in posts {
            self.posts
                .create(&NewPost {
                    author_id,
                    title: title.to_string(),
                    content: content.to_string(),
                    tags: tags.into_iter().map(str::to_string).collect(),
                })
                .await?;
        }
        log::info!("Finished creating posts");
        Ok(())
    }

    async fn create_initial_tags(&self) -> DomainResult<()> {
        log::info!("Starting to create tags...");
        let tags = self
            .tags
            .resolve(&["#happy", "#worst-day-ever", "#youcandoanything", "#catmandoeverything"])
            .await?;
        // Resolved tags come back in id order, so pick them out by name
        let tag = |name: &str| {
            tags.iter()
                .find(|t| t.name == name)
                .cloned()
                .ok_or_else(|| DomainError::NotFound(format!("tag {}", name)))
        };
        let happy = tag("#happy")?;
        let sad = tag("#worst-day-ever")?;
        let inspo = tag("#youcandoanything")?;
        let catman = tag("#catmandoeverything")?;

        let posts = self.posts.list().await?;
        let [post_one, post_two, post_three] = posts.as_slice() else {
            return Err(DomainError::NotFound(format!(
                "expected 3 seeded posts, found {}",
                posts.len()
            )));
        };

        self.posts
            .add_tags_to_post(post_one.id, &[happy.clone(), inspo.clone()])
            .await?;
        self.posts
            .add_tags_to_post(post_two.id, &[sad, inspo.clone()])
            .await?;
        self.posts
            .add_tags_to_post(post_three.id, &[happy, catman, inspo])
            .await?;
        log::info!("Finished creating tags");
        Ok(())
    }

    /// Run every read and update path once and log the results
    pub async fn exercise(&self) -> DomainResult<()> {
        let users = self.users.list().await?;
        log::info!("All users: {:?}", users);

        if let Some(first) = users.first() {
            let updated = self
                .users
                .update(
                    first.id,
                    &UserUpdate {
                        name: Some("Newname Sogood".to_string()),
                        location: Some("Lesterville, KY".to_string()),
                        ..Default::default()
                    },
                )
                .await?;
            log::info!("Renamed first user: {:?}", updated);
        }

        let posts = self.posts.list().await?;
        log::info!("All posts: {:?}", posts);

        if let Some(first) = posts.first() {
            let updated = self
                .posts
                .update(
                    first.id,
                    &PostUpdate {
                        title: Some("New Title".to_string()),
                        content: Some("Updated Content".to_string()),
                        ..Default::default()
                    },
                )
                .await?;
            log::info!("Rewrote first post: {:?}", updated);

            let retagged = self
                .posts
                .update(
                    first.id,
                    &PostUpdate {
                        tags: Some(vec![
                            "#youcandoanything".to_string(),
                            "#redfish".to_string(),
                            "#bluefish".to_string(),
                        ]),
                        ..Default::default()
                    },
                )
                .await?;
            log::info!("Retagged first post: {:?}", retagged);
        }

        if let Some(first) = users.first() {
            let user = self.users.find_by_id(first.id).await?;
            log::info!("User {} with posts: {:?}", first.id, user);
        }

        let happy = self.posts.list_by_tag_name("#happy").await?;
        log::info!("Posts tagged #happy: {:?}", happy);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::init_db;

    #[tokio::test]
    async fn test_rebuild_loads_demo_data() {
        let seeder = Seeder::new(init_db(":memory:").unwrap());
        seeder.rebuild().await.expect("rebuild failed");

        let users = seeder.users.list().await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["albert", "sandra", "glamgal"]);

        let posts = seeder.posts.list().await.unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(
            posts[0].tag_names(),
            vec!["#happy", "#youcandoanything"]
        );

        assert_eq!(seeder.tags.list().await.unwrap().len(), 6);
        assert_eq!(seeder.posts.list_by_tag_name("#youcandoanything").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_rebuild_twice_starts_over() {
        let seeder = Seeder::new(init_db(":memory:").unwrap());
        seeder.rebuild().await.unwrap();
        seeder.rebuild().await.unwrap();

        assert_eq!(seeder.users.list().await.unwrap().len(), 3);
        assert_eq!(seeder.posts.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_exercise_updates_first_post() {
        let seeder = Seeder::new(init_db(":memory:").unwrap());
        seeder.rebuild().await.unwrap();
        seeder.exercise().await.expect("exercise failed");

        let posts = seeder.posts.list().await.unwrap();
        assert_eq!(posts[0].title, "New Title");
        let mut tags = posts[0].tag_names();
        tags.sort();
        assert_eq!(tags, vec!["#bluefish", "#redfish", "#youcandoanything"]);

        let users = seeder.users.list().await.unwrap();
        assert_eq!(users[0].name, "Newname Sogood");
        assert_eq!(users[0].location, "Lesterville, KY");
    }
}
