use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::follow_repository::FollowRepository;
use crate::application::ports::like_repository::LikeRepository;
use crate::application::ports::pet_repository::PetRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::pets::pet::PetAttributes;
use crate::domain::posts::post::Post;
use crate::domain::users::user::User;

// (email, name, bio)
const SAMPLE_USERS: &[(&str, &str, &str)] = &[
    ("john.doe@example.com", "John Doe", "I'm a pet shop owner"),
    ("jane.smith@example.com", "Jane Smith", "I'm a cat lover"),
    ("alex.johnson@example.com", "Alex Johnson", "I'm a dog lover"),
    ("emily.wilson@example.com", "Emily Wilson", "I'm a food lover"),
    ("michael.brown@example.com", "Michael Brown", "I'm a flower shop owner"),
];

// Indexes into SAMPLE_USERS.
const SAMPLE_FOLLOWS: &[(usize, usize)] = &[(0, 1), (1, 0), (2, 3), (4, 3)];

const PET_IMAGE_KEY: &str =
    "pets/26c4d55c-c16b-49b7-a4ef-5daa6ef2777f-BAB51C25-2C0A-4EC9-B7F5-96CAE90B0C48.jpg";
const POST_IMAGE_KEY: &str = "posts/98578a83-1d7d-4c25-aeea-c9b392e484e4-photo.jpg";

// (owner, name, type, species, birthday)
const SAMPLE_PETS: &[(usize, &str, &str, &str, &str)] = &[
    (0, "Max", "dog", "saluki", "2023-01-15"),
    (1, "Luna", "cat", "siamese", "2022-05-10"),
    (2, "Buddy", "dog", "beagle", "2021-11-22"),
    (3, "Coco", "dog", "poodle", "2023-03-05"),
    (4, "Rocky", "dog", "golden_retriever", "2022-08-17"),
    (0, "Milo", "cat", "munchkin", "2023-02-28"),
];

// (author, caption)
const SAMPLE_POSTS: &[(usize, &str)] = &[
    (0, "Max's first day at the park"),
    (1, "Luna's New Toy"),
    (2, "Buddy's Birthday Celebration"),
    (3, "Coco's New Hutch"),
    (4, "Rocky's First Swimming Lesson"),
    (0, "Milo's Favorite Napping Spot"),
];

// (post, author, content)
const SAMPLE_COMMENTS: &[(usize, usize, &str)] = &[
    (0, 1, "He looks so happy! What breed is he?"),
    (1, 2, "That's such a cute toy! Where did you get it?"),
    (2, 3, "Happy birthday, Buddy! That cake looks delicious."),
    (3, 4, "What a nice hutch! Coco must be very happy."),
    (4, 0, "Swimming is great exercise for dogs! Rocky looks like he's having fun."),
    (5, 1, "Haha, classic cat behavior! Milo is adorable."),
    (0, 2, "I love the park too! We should arrange a playdate for our dogs."),
];

// (post, user)
const SAMPLE_LIKES: &[(usize, usize)] = &[
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 3),
    (2, 0),
    (2, 1),
    (3, 2),
    (4, 3),
    (5, 1),
    (5, 4),
];

/// Repositories the sample data is written through.
pub struct SeedTargets<'a> {
    pub users: &'a dyn UserRepository,
    pub follows: &'a dyn FollowRepository,
    pub pets: &'a dyn PetRepository,
    pub posts: &'a dyn PostRepository,
    pub comments: &'a dyn CommentRepository,
    pub likes: &'a dyn LikeRepository,
}

/// Rows created by one seeding run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub pets: usize,
    pub posts: usize,
    pub comments: usize,
    pub likes: usize,
}

/// Inserts the sample accounts, their pets, posts, comments, likes and follow
/// graph. Rows that already exist are reused, so running it twice changes nothing.
pub async fn seed_sample_data(to: &SeedTargets<'_>) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();

    let mut users: Vec<User> = Vec::with_capacity(SAMPLE_USERS.len());
    for (email, name, bio) in SAMPLE_USERS {
        let user = match to.users.find_by_email(email).await? {
            Some(existing) => existing,
            None => {
                let user = to.users.create(name, email).await?;
                to.users.update_profile(user.id, name, bio, None).await?;
                report.users += 1;
                user
            }
        };
        users.push(user);
    }
    for (from, to_user) in SAMPLE_FOLLOWS {
        to.follows.follow(users[*from].id, users[*to_user].id).await?;
    }

    for (owner, name, pet_type, species, birth_day) in SAMPLE_PETS {
        let owner_id = users[*owner].id;
        let existing = to.pets.list_by_owner(owner_id).await?;
        if existing.iter().any(|p| p.name == *name) {
            continue;
        }
        let attrs = PetAttributes::parse(name, pet_type, species, birth_day)?;
        to.pets.create(owner_id, &attrs, PET_IMAGE_KEY).await?;
        report.pets += 1;
    }

    let mut posts: Vec<Post> = Vec::with_capacity(SAMPLE_POSTS.len());
    for (author, caption) in SAMPLE_POSTS {
        let author_id = users[*author].id;
        let existing = to
            .posts
            .list_by_user(author_id)
            .await?
            .into_iter()
            .map(|p| p.post)
            .find(|p| p.caption == *caption);
        let post = match existing {
            Some(post) => post,
            None => {
                report.posts += 1;
                to.posts.create(author_id, caption, POST_IMAGE_KEY).await?
            }
        };
        posts.push(post);
    }

    for (post, author, content) in SAMPLE_COMMENTS {
        let post_id = posts[*post].id;
        let author_id = users[*author].id;
        let existing = to.comments.list_for_post(post_id).await?;
        if existing
            .iter()
            .any(|c| c.comment.user_id == author_id && c.comment.content == *content)
        {
            continue;
        }
        to.comments.create(author_id, post_id, content).await?;
        report.comments += 1;
    }

    for (post, user) in SAMPLE_LIKES {
        if to.likes.like(users[*user].id, posts[*post].id).await? {
            report.likes += 1;
        }
    }

    tracing::info!(?report, "sample_data_seeded");
    Ok(report)
}
